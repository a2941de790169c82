use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::Config;
use crate::mediaremote;
use crate::watch::{self, ChangeTracker};

pub struct App {
    pub config: Config,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::load().with_context(|| "Failed to load config")?;
        Ok(Self { config })
    }

    pub fn now(&self, json: bool) -> Result<()> {
        let source = mediaremote::platform_source();
        let timeout = Duration::from_millis(self.config.fetch.timeout_ms);
        let info = mediaremote::fetch_blocking(&source, timeout)
            .with_context(|| "Failed to fetch now-playing info")?;

        if json || self.config.output.json {
            println!("{}", watch::render_json(&info)?);
        } else {
            println!("{}", watch::render(&info));
        }
        Ok(())
    }

    pub fn watch(&self, json: bool) -> Result<()> {
        let json = json || self.config.output.json;
        info!("Watching for now-playing changes, Ctrl-C to stop");

        let tracker = Mutex::new(ChangeTracker::new());
        mediaremote::observe(move |info| {
            if !tracker.lock().unwrap().accept(&info) {
                return;
            }
            if json {
                match watch::render_json(&info) {
                    Ok(line) => println!("{line}"),
                    Err(e) => error!("Failed to serialize snapshot: {e}"),
                }
            } else {
                println!("{}", watch::render(&info));
            }
        })
        .with_context(|| "Failed to observe now-playing changes")?;

        Ok(())
    }
}
