use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use roundslider::{InteractionMode, SliderOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error(transparent)]
    Options(#[from] roundslider::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "roundslider", "roundslider")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Loads slider options from `path` (a missing file means defaults); `mode` overrides
/// whatever the file says.
pub fn load_options(
    path: &Path,
    mode: Option<InteractionMode>,
) -> Result<SliderOptions, ConfigError> {
    let options = SliderOptions::load(Some(path))?;
    Ok(match mode {
        Some(mode) => options.with_mode(mode),
        None => options,
    })
}

pub fn write_default_config(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

/// Sends [`AppEvent::ConfigReload`] whenever the file at `config_path` is written, created or
/// removed. Runs until the app side hangs up.
pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(&config_path, &tx).await {
        log::error!("Config hot reload disabled: {}", e);
    }
}

async fn watch_config(config_path: &Path, tx: &Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_dir = config_path.parent().ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(config_dir)?;

    let (events_tx, events) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = events_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = events.recv().await {
        match res {
            Ok(event) if touches_config(&event, config_path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Config watch error: {}", ConfigError::from(e)),
        }
    }
    Ok(())
}

fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("roundslider-gtk-{}-{}", name, std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn test_bundled_default_config_matches_defaults() {
        let path = scratch_path("defaults");
        write_default_config(&path).unwrap();
        let options = load_options(&path, None).unwrap();
        let _ = fs_err::remove_dir_all(path.parent().unwrap());

        assert_eq!(options, SliderOptions::default());
    }

    #[test]
    fn test_write_default_config_keeps_existing_file() {
        let path = scratch_path("existing");
        fs_err::create_dir_all(path.parent().unwrap()).unwrap();
        fs_err::write(&path, "step = 20\n").unwrap();

        write_default_config(&path).unwrap();
        let contents = fs_err::read_to_string(&path).unwrap();
        let _ = fs_err::remove_dir_all(path.parent().unwrap());

        assert_eq!(contents, "step = 20\n");
    }

    #[test]
    fn test_mode_override_wins_over_file() {
        let path = scratch_path("mode");
        fs_err::create_dir_all(path.parent().unwrap()).unwrap();
        fs_err::write(&path, "mode = \"surface\"\n").unwrap();

        let options = load_options(&path, Some(InteractionMode::Handle)).unwrap();
        let _ = fs_err::remove_dir_all(path.parent().unwrap());

        assert_eq!(options.mode, InteractionMode::Handle);
    }

    #[test]
    fn test_only_config_file_events_trigger_reload() {
        use notify::event::{AccessKind, CreateKind, ModifyKind};

        let path = PathBuf::from("/tmp/roundslider/config.toml");
        let modify = notify::Event::new(EventKind::Modify(ModifyKind::Any)).add_path(path.clone());
        assert!(touches_config(&modify, &path));

        let create = notify::Event::new(EventKind::Create(CreateKind::File)).add_path(path.clone());
        assert!(touches_config(&create, &path));

        let sibling = notify::Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/tmp/roundslider/other.toml"));
        assert!(!touches_config(&sibling, &path));

        let read = notify::Event::new(EventKind::Access(AccessKind::Any)).add_path(path.clone());
        assert!(!touches_config(&read, &path));
    }
}
