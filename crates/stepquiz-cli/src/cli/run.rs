use crate::cli::run::prompt::StepPrompt;
use crate::cli::run::render::{render_report, render_step};
use crate::opt::{CmsArgs, IndexArgs, Run};
use anyhow::{Error, Result, anyhow};
use reedline::{Reedline, Signal};
use regex::Regex;
use std::path::PathBuf;
use std::sync::Arc;
use stepquiz_client::{CmsConfig, CmsContentSource, FileContentSource, SearchIndexConfig, SearchIndexSink};
use stepquiz_core::quiz::error::TransitionError;
use stepquiz_core::quiz::report::QuizReport;
use stepquiz_core::quiz::runner::{LoadOutcome, PendingPersist, PersistOutcome, QuizRunner};
use stepquiz_core::quiz::session::{Navigation, Phase, QuizSession};
use stepquiz_core::sink::{LoggingSink, ResultsSink};
use stepquiz_core::source::ContentSource;
use stepquiz_http::{HttpClient, RetryConfig};
use stepquiz_utils::tracing::{TracingConfig, setup};
use tracing_core::LevelFilter;
use url::Url;

pub(crate) mod prompt;
mod render;

const HELP: &str = "Type an answer and press enter. Commands: /next /prev /submit /retry /help /exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Answer(String),
    Next,
    Prev,
    Submit,
    Retry,
    Help,
    Exit,
}

/// Anything that is not a `/command` is an answer.
fn parse_command(regex: &Regex, input: &str) -> Option<Command> {
    let Some(captures) = regex.captures(input) else {
        return Some(Command::Answer(input.to_owned()));
    };
    match captures.get(1)?.as_str() {
        "next" => Some(Command::Next),
        "prev" | "back" => Some(Command::Prev),
        "submit" => Some(Command::Submit),
        "retry" => Some(Command::Retry),
        "help" => Some(Command::Help),
        "exit" | "quit" => Some(Command::Exit),
        _ => None,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ContentTarget {
    File(PathBuf),
    Cms(Option<Url>),
}

fn content_target(content: Option<&str>) -> ContentTarget {
    match content {
        None => ContentTarget::Cms(None),
        Some(content) => match Url::parse(content) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => ContentTarget::Cms(Some(url)),
            _ => ContentTarget::File(PathBuf::from(content)),
        },
    }
}

fn cms_config(cms: CmsArgs, base_url: Option<Url>) -> Result<CmsConfig, Error> {
    let (Some(space), Some(token)) = (cms.space, cms.token) else {
        return Err(anyhow!(
            "--cms-space and --cms-token are required unless --content points to a quiz file"
        ));
    };
    Ok(CmsConfig {
        base_url: base_url.unwrap_or(cms.url),
        space,
        environment: cms.environment,
        token,
    })
}

fn results_sink(index: IndexArgs) -> Result<Arc<dyn ResultsSink>, Error> {
    match (index.app_id, index.api_key, index.name) {
        (Some(app_id), Some(api_key), Some(index_name)) => {
            let config = SearchIndexConfig {
                app_id,
                api_key,
                index_name,
                base_url: index.url,
            };
            let http_client = HttpClient::new(RetryConfig::default())?;
            Ok(Arc::new(SearchIndexSink::new(config, http_client)?))
        }
        (None, None, None) => {
            tracing::info!("no search index configured, submissions are only logged");
            Ok(Arc::new(LoggingSink))
        }
        _ => Err(anyhow!(
            "--index-app-id, --index-api-key and --index-name have to be set together"
        )),
    }
}

fn log_level(debug: bool) -> LevelFilter {
    if debug { LevelFilter::DEBUG } else { LevelFilter::INFO }
}

pub(crate) async fn run(opt: Run) -> Result<(), Error> {
    let _guard = setup(
        TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .sentry_dsn(opt.sentry_dsn)
            .env(opt.env)
            .default_level(log_level(opt.debug))
            .build(),
    )?;

    let sink = results_sink(opt.index)?;

    match content_target(opt.content.as_deref()) {
        ContentTarget::File(path) => take_quiz(QuizRunner::new(FileContentSource::new(path), sink)).await,
        ContentTarget::Cms(base_url) => {
            let cms = cms_config(opt.cms, base_url)?;
            let http_client = HttpClient::new(RetryConfig::default())?;
            take_quiz(QuizRunner::new(CmsContentSource::new(cms, http_client), sink)).await
        }
    }
}

fn print_load(outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Ready { steps } => println!("Loaded quiz with {steps} steps. {HELP}"),
        LoadOutcome::Failed(reason) => {
            eprintln!("Could not load the quiz: {reason}");
            println!("Type /retry to try again or /exit to leave.");
        }
    }
}

/// Prints the outcome of a move. Returns true when the step changed.
fn print_navigation(session: &QuizSession, result: Result<Navigation, TransitionError>) -> bool {
    match result {
        Ok(Navigation::Moved(_)) => true,
        Ok(Navigation::Unchanged(_)) => {
            if session.is_last_step() {
                println!("This is the last step. Type /submit to finish or /prev to go back.");
            } else if session.is_first_step() {
                println!("This is the first step.");
            }
            false
        }
        Ok(Navigation::Rejected) => {
            eprintln!("{}", session.validation_error().unwrap_or_default());
            false
        }
        Err(err) => {
            eprintln!("{err}");
            false
        }
    }
}

async fn finish(session: &QuizSession, pending: PendingPersist) {
    if let Some(report) = QuizReport::build(session) {
        print!("{}", render_report(&report));
    }
    match pending.outcome().await {
        PersistOutcome::Stored(object_id) => println!("Results saved ({object_id})."),
        PersistOutcome::Failed(reason) => eprintln!("Results could not be saved: {reason}"),
    }
}

async fn take_quiz<C: ContentSource>(mut runner: QuizRunner<C>) -> Result<(), Error> {
    let mut line_editor = Reedline::create();
    let mut prompt = StepPrompt::default();
    let command_regex = Regex::new(r"^/(\w+)$")?;

    print_load(&runner.load().await?);
    let mut show_step = true;

    loop {
        let session = runner.session();
        match session.phase() {
            Phase::InProgress => {
                if show_step {
                    print!("{}", render_step(session));
                    show_step = false;
                }
                prompt.set_label(format!("{}/{}", session.current_index() + 1, session.steps().len()));
            }
            Phase::LoadFailed { .. } => prompt.set_label("offline"),
            Phase::Loading => prompt.set_label("loading"),
            Phase::Submitted => break,
        }

        let input = match line_editor.read_line(&prompt)? {
            Signal::Success(input) => input,
            Signal::CtrlD | Signal::CtrlC => {
                println!("\nAborted!");
                break;
            }
        };
        tracing::debug!(%input, "got input");

        let Some(command) = parse_command(&command_regex, input.trim()) else {
            eprintln!("Unknown command {input}. {HELP}");
            continue;
        };

        match command {
            Command::Exit => {
                println!("Exiting...");
                break;
            }
            Command::Help => println!("{HELP}"),
            Command::Retry => {
                if matches!(runner.session().phase(), Phase::LoadFailed { .. }) {
                    print_load(&runner.retry_load().await?);
                    show_step = true;
                } else {
                    eprintln!("Nothing to retry.");
                }
            }
            Command::Answer(answer) => {
                let session = runner.session_mut();
                if let Err(err) = session.answer_current(answer) {
                    eprintln!("{err}");
                    continue;
                }
                if session.is_last_step() {
                    println!("Type /submit to finish or /prev to go back.");
                } else {
                    let result = session.next();
                    show_step = print_navigation(session, result);
                }
            }
            Command::Next => {
                let session = runner.session_mut();
                let result = session.next();
                show_step = print_navigation(session, result);
            }
            Command::Prev => {
                let session = runner.session_mut();
                let result = session.previous();
                show_step = print_navigation(session, result);
            }
            Command::Submit => match runner.submit() {
                Ok(Some(pending)) => {
                    finish(runner.session(), pending).await;
                    break;
                }
                Ok(None) => eprintln!("{}", runner.session().validation_error().unwrap_or_default()),
                Err(err) => eprintln!("{err}"),
            },
        }
    }

    Ok(())
}
