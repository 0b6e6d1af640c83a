use moon::*;
use shared::{DownMsg, UpMsg, ViewConfig};
use std::path::PathBuf;

// ===== CENTRALIZED DEBUG FLAGS =====
const DEBUG_BACKEND: bool = false; // Backend request/response debugging
const DEBUG_CONFIG: bool = true; // Config file discovery

// Debug macro for easy toggling
macro_rules! debug_log {
    ($flag:expr, $($arg:tt)*) => {
        if $flag {
            println!($($arg)*);
        }
    };
}

const CONFIG_FILE_NAME: &str = "dashboard.toml";
const CONFIG_DIR_NAME: &str = "nezha-dashboard";
const CONFIG_PATH_ENV: &str = "DASHBOARD_CONFIG";
const FETCH_INTERVAL_ENV: &str = "NEZHA_FETCH_INTERVAL";
const SHOW_TAG_ENV: &str = "NEZHA_SHOW_TAG";

async fn frontend() -> Frontend {
    Frontend::new()
        .title("Server Status")
        .index_by_robots(false)
}

async fn up_msg_handler(req: UpMsgRequest<UpMsg>) {
    let (session_id, cor_id) = (req.session_id, req.cor_id);

    debug_log!(DEBUG_BACKEND, "🔍 BACKEND: Received {:?}", req.up_msg);

    match req.up_msg {
        UpMsg::LoadViewConfig => {
            let config = load_view_config().await;
            send_down_msg(DownMsg::ViewConfigLoaded(config), session_id, cor_id).await;
        }
    }
}

async fn send_down_msg(msg: DownMsg, session_id: SessionId, cor_id: CorId) {
    if let Some(session) = sessions::by_session_id().wait_for(session_id).await {
        session.send_down_msg(&msg, cor_id).await;
    } else {
        debug_log!(DEBUG_BACKEND, "🔍 BACKEND: Session {:?} gone before reply", session_id);
    }
}

/// Explicit path first, then the working directory, then the user config dir.
fn config_candidates(explicit: Option<PathBuf>, config_dir: Option<PathBuf>) -> Vec<PathBuf> {
    explicit
        .into_iter()
        .chain(std::iter::once(PathBuf::from(CONFIG_FILE_NAME)))
        .chain(config_dir.map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)))
        .collect()
}

/// Parses the first candidate that exists. `Ok(None)` when none does.
async fn read_first_config(candidates: &[PathBuf]) -> Result<Option<(PathBuf, ViewConfig)>, String> {
    for path in candidates {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let config = ViewConfig::from_toml_str(&content)
                    .map_err(|error| format!("{}: {}", path.display(), error))?;
                return Ok(Some((path.clone(), config)));
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => continue,
            Err(error) => return Err(format!("Failed to read {}: {}", path.display(), error)),
        }
    }
    Ok(None)
}

async fn load_view_config() -> ViewConfig {
    let candidates = config_candidates(
        std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from),
        dirs::config_dir(),
    );
    let refresh_interval = std::env::var(FETCH_INTERVAL_ENV).ok();
    let show_tag = std::env::var(SHOW_TAG_ENV).ok();

    resolve_view_config(&candidates, refresh_interval.as_deref(), show_tag.as_deref()).await
}

/// File values (or defaults when no file is usable), then env overrides.
async fn resolve_view_config(
    candidates: &[PathBuf],
    refresh_interval: Option<&str>,
    show_tag: Option<&str>,
) -> ViewConfig {
    let config = match read_first_config(candidates).await {
        Ok(Some((path, config))) => {
            debug_log!(DEBUG_CONFIG, "⚙️ CONFIG: loaded {}", path.display());
            config
        }
        Ok(None) => {
            debug_log!(DEBUG_CONFIG, "⚙️ CONFIG: no {} found, using defaults", CONFIG_FILE_NAME);
            ViewConfig::default()
        }
        Err(error) => {
            eprintln!("⚙️ CONFIG: {}, using defaults", error);
            ViewConfig::default()
        }
    };

    config.with_overrides(refresh_interval, show_tag)
}

#[moon::main]
async fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        println!("BACKEND PANIC: {:?}", panic_info);
    }));

    start(frontend, up_msg_handler, |_error| {}).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn candidates_are_ordered_by_precedence() {
        let candidates = config_candidates(
            Some(PathBuf::from("/etc/custom.toml")),
            Some(PathBuf::from("/home/ops/.config")),
        );

        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/etc/custom.toml"),
                PathBuf::from("dashboard.toml"),
                PathBuf::from("/home/ops/.config/nezha-dashboard/dashboard.toml"),
            ]
        );
        assert_eq!(config_candidates(None, None), vec![PathBuf::from("dashboard.toml")]);
    }

    #[tokio::test]
    async fn first_existing_candidate_wins() {
        let path = scratch_file("first-existing.toml", "show_tag = true\nrefresh_interval_ms = 5000\n");
        let missing = std::env::temp_dir().join("does-not-exist-dashboard.toml");

        let (found, config) = read_first_config(&[missing, path.clone()])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found, path);
        assert!(config.show_tag);
        assert_eq!(config.refresh_interval_ms, 5000);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn no_candidate_means_defaults() {
        let missing = std::env::temp_dir().join("also-missing-dashboard.toml");
        assert_eq!(read_first_config(&[missing]).await.unwrap(), None);
    }

    #[tokio::test]
    async fn broken_file_is_reported() {
        let path = scratch_file("broken.toml", "show_tag = [");

        let error = read_first_config(&[path.clone()]).await.unwrap_err();

        assert!(error.contains("broken.toml"));
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn broken_file_still_gets_env_overrides() {
        let path = scratch_file("broken-with-env.toml", "show_tag = [");

        let config = resolve_view_config(&[path.clone()], Some("5000"), Some("true")).await;

        assert!(config.show_tag);
        assert_eq!(config.refresh_interval_ms, 5000);
        assert_eq!(config.snapshot_url, ViewConfig::default().snapshot_url);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn env_overrides_take_precedence_over_file() {
        let path = scratch_file("overridden.toml", "show_tag = true\nrefresh_interval_ms = 9000\n");

        let config = resolve_view_config(&[path.clone()], Some("abc"), Some("yes")).await;

        assert!(!config.show_tag);
        assert_eq!(config.refresh_interval_ms, 2000);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn file_values_stay_without_overrides() {
        let path = scratch_file("plain.toml", "show_tag = true\nrefresh_interval_ms = 9000\n");

        let config = resolve_view_config(&[path.clone()], None, None).await;

        assert!(config.show_tag);
        assert_eq!(config.refresh_interval_ms, 9000);
        std::fs::remove_file(path).unwrap();
    }
}
