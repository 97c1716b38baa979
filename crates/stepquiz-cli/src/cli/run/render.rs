use stepquiz_core::quiz::report::{ChartData, QuizReport};
use stepquiz_core::quiz::session::QuizSession;
use stepquiz_model::quiz::question::QuestionType;

const BAR_WIDTH: usize = 30;

pub(crate) fn render_step(session: &QuizSession) -> String {
    let Some(question) = session.current_question() else {
        return String::new();
    };
    let mut out = format!(
        "\nStep {} of {}\n{}\n",
        session.current_index() + 1,
        session.steps().len(),
        question.prompt
    );
    match question.r#type {
        QuestionType::MultipleChoice => {
            for choice in &question.choices {
                out.push_str(&format!("  {choice}\n"));
            }
            out.push_str("Type the letter of your choice.\n");
        }
        QuestionType::OpenEnded => out.push_str("Type your answer.\n"),
    }
    if let Some(answer) = session.answer_for(&question.id) {
        out.push_str(&format!("Current answer: {answer}\n"));
    }
    out
}

fn bar(count: usize, total: usize) -> String {
    let width = (count * BAR_WIDTH).checked_div(total).unwrap_or(0);
    "█".repeat(width)
}

pub(crate) fn render_chart(chart: ChartData) -> String {
    let total = chart.correct + chart.incorrect;
    format!(
        "Correct   {} {}\nIncorrect {} {}\n",
        bar(chart.correct, total),
        chart.correct,
        bar(chart.incorrect, total),
        chart.incorrect
    )
}

pub(crate) fn render_report(report: &QuizReport) -> String {
    let mut out = format!("\n{}\n\n", report.headline());
    for row in &report.rows {
        let mark = if row.correct { "✔" } else { "✘" };
        out.push_str(&format!("{mark} {}. {}\n   Your answer: {}\n", row.position, row.prompt, row.answer));
        if let (false, Some(correct)) = (row.correct, &row.correct_answer) {
            out.push_str(&format!("   Correct answer: {correct}\n"));
        }
        if let Some(explanation) = &row.explanation {
            out.push_str(&format!("   {explanation}\n"));
        }
    }
    out.push('\n');
    out.push_str(&render_chart(report.chart));
    out
}
