use anyhow::Error;
use stepquiz_config::quiz::json_schema;

pub(crate) fn schema() -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(&json_schema())?);
    Ok(())
}
