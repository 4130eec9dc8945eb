use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// A scripted run: who spawns where, what they hold down, what gets thrown.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Script {
    #[serde(default)]
    pub walkers: Vec<Walker>,
    #[serde(default)]
    pub throws: Vec<Throw>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Walker {
    /// Column to spawn on.
    pub column: [i32; 2],
    /// Raw key bits, see `InputState`.
    #[serde(default)]
    pub keys: u8,
    #[serde(default = "default_aim")]
    pub aim: [f32; 3],
    /// Held tool id, see `Tool`. Unknown ids fall back to the block.
    #[serde(default = "default_tool")]
    pub tool: u8,
    /// Holds secondary fire, which slows a gun holder down.
    #[serde(default)]
    pub aiming: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Throw {
    /// Index into `walkers`.
    pub by: usize,
    pub at_tick: u64,
    pub vel: [f32; 3],
    #[serde(default = "default_fuse")]
    pub fuse_secs: f32,
}

fn default_aim() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}

fn default_tool() -> u8 {
    1
}

fn default_fuse() -> f32 {
    3.0
}

impl Default for Script {
    fn default() -> Self {
        Self {
            walkers: vec![
                Walker {
                    column: [200, 200],
                    keys: 1,
                    aim: [0.8, 0.6, 0.0],
                    tool: default_tool(),
                    aiming: false,
                },
                Walker {
                    column: [260, 230],
                    keys: 2 | 4,
                    aim: [-0.6, 0.8, 0.0],
                    tool: 2,
                    aiming: true,
                },
                Walker {
                    column: [300, 300],
                    keys: 0,
                    aim: default_aim(),
                    tool: 3,
                    aiming: false,
                },
            ],
            throws: vec![Throw {
                by: 2,
                at_tick: 30,
                vel: [0.5, 0.2, -0.4],
                fuse_secs: default_fuse(),
            }],
        }
    }
}

impl Script {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let script: Script = toml::from_str(s)?;
        for t in &script.throws {
            if t.by >= script.walkers.len() {
                return Err(format!("throw by walker {} but only {} walkers", t.by, script.walkers.len()).into());
            }
        }
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        let script = Self::from_toml_str(&s)?;
        log::info!(
            "loaded script {} ({} walkers, {} throws)",
            path.display(),
            script.walkers.len(),
            script.throws.len()
        );
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_walkers_and_throws() {
        let s = r#"
            [[walkers]]
            column = [10, 20]
            keys = 1

            [[walkers]]
            column = [30, 40]
            aim = [0.0, 1.0, 0.0]
            tool = 2
            aiming = true

            [[throws]]
            by = 1
            at_tick = 5
            vel = [0.1, 0.0, -0.2]
        "#;
        let script = Script::from_toml_str(s).unwrap();
        assert_eq!(script.walkers.len(), 2);
        assert_eq!(script.walkers[0].aim, [1.0, 0.0, 0.0]);
        assert_eq!(script.walkers[1].keys, 0);
        assert_eq!((script.walkers[0].tool, script.walkers[0].aiming), (1, false));
        assert_eq!((script.walkers[1].tool, script.walkers[1].aiming), (2, true));
        assert_eq!(script.throws[0].fuse_secs, 3.0);
    }

    #[test]
    fn throw_by_unknown_walker_is_rejected() {
        let s = r#"
            [[throws]]
            by = 0
            at_tick = 1
            vel = [0.0, 0.0, 0.0]
        "#;
        assert!(Script::from_toml_str(s).is_err());
    }

    #[test]
    fn empty_script_is_valid() {
        let script = Script::from_toml_str("").unwrap();
        assert!(script.walkers.is_empty() && script.throws.is_empty());
    }
}
