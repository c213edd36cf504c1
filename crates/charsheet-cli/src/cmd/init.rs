use charsheet_core::config::{Config, CONFIG_FILE};
use charsheet_core::io::write_if_missing;
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let config_path = root.join(CONFIG_FILE);
    if config_path.exists() {
        println!("exists:  {}", config_path.display());
    } else {
        let config = Config::default();
        config.save(root)?;
        println!("created: {}", config_path.display());
    }

    let config = Config::load(root)?;
    let data_path = config.data_path(root);
    if write_if_missing(&data_path, b"")? {
        println!("created: {}", data_path.display());
    } else {
        println!("exists:  {}", data_path.display());
    }

    Ok(())
}
