use std::path::PathBuf;

const DEFAULT_TICK_MS: u64 = 16;
const DEFAULT_RENDER_FPS: u64 = 120;
const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime knobs read from `MAZE_*` environment variables.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub tick_ms: u64,
    pub render_fps: u64,
    pub maze_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            render_fps: DEFAULT_RENDER_FPS,
            maze_file: None,
            log_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            tick_ms: positive(lookup("MAZE_TICK_MS")).unwrap_or(DEFAULT_TICK_MS),
            render_fps: positive(lookup("MAZE_FPS")).unwrap_or(DEFAULT_RENDER_FPS),
            maze_file: path(lookup("MAZE_FILE")),
            log_file: path(lookup("MAZE_LOG_FILE")),
            log_filter: lookup("MAZE_LOG")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Simulation step in seconds.
    pub fn tick_secs(&self) -> f64 {
        self.tick_ms as f64 / 1000.0
    }
}

fn positive(value: Option<String>) -> Option<u64> {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
}

fn path(value: Option<String>) -> Option<PathBuf> {
    value.filter(|v| !v.trim().is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(settings(&[]), Settings::default());
    }

    #[test]
    fn reads_values() {
        let s = settings(&[
            ("MAZE_TICK_MS", "10"),
            ("MAZE_FPS", " 60 "),
            ("MAZE_FILE", "levels/one.txt"),
            ("MAZE_LOG_FILE", "/tmp/maze.log"),
            ("MAZE_LOG", "maze_chase=debug"),
        ]);
        assert_eq!(s.tick_ms, 10);
        assert_eq!(s.render_fps, 60);
        assert_eq!(s.maze_file, Some(PathBuf::from("levels/one.txt")));
        assert_eq!(s.log_file, Some(PathBuf::from("/tmp/maze.log")));
        assert_eq!(s.log_filter, "maze_chase=debug");
        assert_eq!(s.tick_secs(), 0.01);
    }

    #[test]
    fn bad_numbers_fall_back() {
        let s = settings(&[("MAZE_TICK_MS", "0"), ("MAZE_FPS", "fast"), ("MAZE_FILE", "  ")]);
        assert_eq!(s.tick_ms, DEFAULT_TICK_MS);
        assert_eq!(s.render_fps, DEFAULT_RENDER_FPS);
        assert_eq!(s.maze_file, None);
    }
}
