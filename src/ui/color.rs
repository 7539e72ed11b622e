//! Terminal color helpers for result lines

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const MAGENTA: &'static str = "\x1b[35m";
}

/// Wrap `text` in `color` when `enabled`, otherwise return it unchanged.
pub fn colorize_if(enabled: bool, text: &str, color: &str) -> String {
    if enabled {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Whether ANSI escapes should be written to stdout.
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Output is being redirected
    if !std::io::stdout().is_terminal() {
        return false;
    }

    !matches!(env::var("TERM").as_deref(), Ok("dumb") | Ok(""))
}

/// Combine the configured color setting with what the terminal supports.
pub fn color_enabled(configured: bool) -> bool {
    configured && supports_formatting()
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use serial_test::serial;

    #[test]
    fn test_colorize_if__enabled() {
        assert_eq!(colorize_if(true, "200", Colors::GREEN), "\x1b[32m200\x1b[0m");
    }

    #[test]
    fn test_colorize_if__disabled() {
        assert_eq!(colorize_if(false, "200", Colors::GREEN), "200");
        assert_eq!(colorize_if(false, "", Colors::RED), "");
    }

    #[test]
    #[serial]
    fn test_supports_formatting__no_color() {
        let original_force = std::env::var("FORCE_COLOR").ok();
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }

        assert!(!supports_formatting());
        assert!(!color_enabled(true));

        unsafe {
            std::env::remove_var("NO_COLOR");
            match original_force {
                Some(val) => std::env::set_var("FORCE_COLOR", val),
                None => std::env::remove_var("FORCE_COLOR"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_supports_formatting__force_color() {
        let original_no_color = std::env::var("NO_COLOR").ok();
        let original_force = std::env::var("FORCE_COLOR").ok();
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::set_var("FORCE_COLOR", "1");
        }

        assert!(supports_formatting());
        assert!(color_enabled(true));
        assert!(!color_enabled(false));

        unsafe {
            std::env::set_var("FORCE_COLOR", "0");
        }
        assert!(!supports_formatting());

        unsafe {
            match original_force {
                Some(val) => std::env::set_var("FORCE_COLOR", val),
                None => std::env::remove_var("FORCE_COLOR"),
            }
            if let Some(val) = original_no_color {
                std::env::set_var("NO_COLOR", val);
            }
        }
    }
}
