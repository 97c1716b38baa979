use crate::opt::Validate;
use anyhow::{Error, Result, anyhow};
use stepquiz_config::quiz::error::Severity;
use stepquiz_config::quiz::{load_from_path, validate as validate_content};

pub(crate) async fn validate(opt: Validate) -> Result<(), Error> {
    let mut errors = 0;
    let mut warnings = 0;

    for path in &opt.paths {
        let content = match load_from_path(path).await {
            Ok(content) => content,
            Err(err) => {
                eprintln!("error: {}: {err}", path.display());
                errors += 1;
                continue;
            }
        };

        let findings = validate_content(&content);
        for finding in &findings {
            eprintln!("{}: {}: {finding}", finding.severity(), path.display());
            match finding.severity() {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
            }
        }
        if findings.is_empty() {
            println!("Quiz {} with {} steps is ok 👌", path.display(), content.steps.len());
        }
    }

    if errors > 0 {
        return Err(anyhow!("Found {errors} errors and {warnings} warnings"));
    }
    if opt.strict && warnings > 0 {
        return Err(anyhow!("Found {warnings} warnings"));
    }
    Ok(())
}
