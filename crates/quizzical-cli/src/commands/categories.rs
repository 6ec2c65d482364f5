use quizzical_core::{CategoryProvider, Config, OpenTdbClient};

pub async fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let client = OpenTdbClient::from_config(&config.provider)?;
    let categories = client.fetch_categories().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }
    println!("{:>4}  Name", "ID");
    for category in &categories {
        println!("{:>4}  {}", category.id, category.name);
    }
    Ok(())
}
