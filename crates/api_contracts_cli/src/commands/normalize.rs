use anyhow::Result;
use api_contracts_core::normalize_url;

pub fn execute(url: &str) -> Result<()> {
    println!("{}", normalize_url(url));
    Ok(())
}
