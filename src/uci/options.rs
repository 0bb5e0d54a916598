use crate::engine::MAX_HASH_MB;

/// What the front end must do after an option changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciOptionAction {
    ReinitHash(usize),
}

pub struct UciOptions {
    pub hash_mb: usize,
}

impl UciOptions {
    #[must_use]
    pub fn new(hash_mb: usize) -> Self {
        UciOptions { hash_mb }
    }

    /// The `option` lines sent in reply to `uci`
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        vec![format!(
            "option name Hash type spin default {} min 0 max {}",
            self.hash_mb, MAX_HASH_MB
        )]
    }

    /// Apply `setoption`. Unknown names and unparsable values are ignored.
    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> Option<UciOptionAction> {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "hash" => {
                let mb = value.and_then(|v| v.trim().parse::<usize>().ok())?;
                self.hash_mb = mb.min(MAX_HASH_MB);
                Some(UciOptionAction::ReinitHash(self.hash_mb))
            }
            _ => {
                log::warn!("ignoring unknown option '{name}'");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_option_is_clamped() {
        let mut options = UciOptions::new(2);
        assert_eq!(
            options.apply_setoption("Hash", Some("16")),
            Some(UciOptionAction::ReinitHash(16))
        );
        assert_eq!(
            options.apply_setoption("hash", Some("100000")),
            Some(UciOptionAction::ReinitHash(MAX_HASH_MB))
        );
        assert_eq!(options.apply_setoption("Hash", Some("lots")), None);
        assert_eq!(options.apply_setoption("Threads", Some("4")), None);
        assert_eq!(options.hash_mb, MAX_HASH_MB);
    }

    #[test]
    fn describes_hash_option() {
        let options = UciOptions::new(2);
        assert_eq!(
            options.describe(),
            vec!["option name Hash type spin default 2 min 0 max 512".to_string()]
        );
    }
}
