//! Write the default nutrition recommendations to `alimentacion.txt`
//!
//! Leaves an existing file alone.

use gympal::config::ServerConfig;
use gympal::store::DataStore;
use gympal::tools::nutrition::seed_recommendations;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    println!("Data directory: {}", config.data_dir.display());

    let store = DataStore::open(&config.data_dir)?;
    let result = seed_recommendations(&store)?;

    if result.seeded {
        println!("Wrote {} recommendations", result.rows);
    } else {
        println!("alimentacion.txt already has {} rows, nothing to do", result.rows);
    }
    Ok(())
}
