use clap::ArgAction;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use stepquiz_client::content::cms::{DEFAULT_CMS_URL, DEFAULT_ENVIRONMENT};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "stepquiz", about = "Take a step-by-step quiz in the terminal", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Take a quiz
    Run(Run),

    /// Check quiz files for errors
    Validate(Validate),

    /// Print the JSON schema of quiz files
    Schema,
}

#[derive(Debug, Parser)]
pub(crate) struct Run {
    #[arg(short, long)]
    pub(crate) debug: bool,

    /// Path of a quiz file or base url of the CMS delivery API
    #[arg(short, long)]
    pub(crate) content: Option<String>,

    #[command(flatten)]
    pub(crate) cms: CmsArgs,

    #[command(flatten)]
    pub(crate) index: IndexArgs,

    #[arg(long, env = "SENTRY_DSN")]
    pub(crate) sentry_dsn: Option<String>,

    #[arg(long, env = "STEPQUIZ_ENV", default_value = "dev")]
    pub(crate) env: String,
}

#[derive(Debug, Args)]
pub(crate) struct CmsArgs {
    #[arg(long = "cms-space", env = "STEPQUIZ_CMS_SPACE")]
    pub(crate) space: Option<String>,

    #[arg(long = "cms-environment", env = "STEPQUIZ_CMS_ENVIRONMENT", default_value = DEFAULT_ENVIRONMENT)]
    pub(crate) environment: String,

    #[arg(long = "cms-token", env = "STEPQUIZ_CMS_TOKEN", hide_env_values = true)]
    pub(crate) token: Option<String>,

    #[arg(id = "cms_url", long = "cms-url", env = "STEPQUIZ_CMS_URL", default_value = DEFAULT_CMS_URL)]
    pub(crate) url: Url,
}

/// Without app id, api key and index name submissions are only logged.
#[derive(Debug, Args)]
pub(crate) struct IndexArgs {
    #[arg(long = "index-app-id", env = "STEPQUIZ_INDEX_APP_ID")]
    pub(crate) app_id: Option<String>,

    #[arg(long = "index-api-key", env = "STEPQUIZ_INDEX_API_KEY", hide_env_values = true)]
    pub(crate) api_key: Option<String>,

    #[arg(long = "index-name", env = "STEPQUIZ_INDEX_NAME")]
    pub(crate) name: Option<String>,

    #[arg(id = "index_url", long = "index-url", env = "STEPQUIZ_INDEX_URL")]
    pub(crate) url: Option<Url>,
}

#[derive(Debug, Parser)]
pub(crate) struct Validate {
    #[arg(required = true)]
    pub(crate) paths: Vec<PathBuf>,

    /// Treat warnings as errors
    #[arg(
        long,
        default_missing_value("true"),
        default_value("false"),
        num_args(0..=1),
        require_equals(true),
        action = ArgAction::Set
    )]
    pub(crate) strict: bool,
}
