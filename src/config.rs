//! Configuration for x0xmd.
//!
//! CLI arguments and environment variable handling using clap. All installer
//! artifact URLs are resolved once at startup; nothing re-reads the
//! environment per request.

use clap::Parser;
use std::net::SocketAddr;

pub const DEFAULT_INSTALL_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/JimCollinson/x0x/main/scripts/install.sh";
pub const DEFAULT_SKILL_URL: &str =
    "https://github.com/saorsa-labs/x0x/releases/latest/download/SKILL.md";
pub const DEFAULT_SKILL_SIGNATURE_URL: &str =
    "https://github.com/saorsa-labs/x0x/releases/latest/download/SKILL.md.sig";
pub const DEFAULT_GPG_KEY_URL: &str =
    "https://github.com/saorsa-labs/x0x/releases/latest/download/SAORSA_PUBLIC_KEY.asc";

/// x0xmd - machine-readable discovery surface for the x0x daemon
#[derive(Parser, Debug, Clone)]
#[command(name = "x0xmd")]
#[command(about = "Serves machine-readable contracts describing the x0x agent stack")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Public host used when rendering absolute URLs in human-facing output
    #[arg(long, env = "PUBLIC_HOST", default_value = "x0x.md")]
    pub public_host: String,

    /// Upstream install script proxied at /install.sh
    #[arg(long, env = "INSTALL_SCRIPT_URL", default_value = DEFAULT_INSTALL_SCRIPT_URL)]
    pub install_script_url: String,

    /// Upstream SKILL.md release artifact
    #[arg(long, env = "SKILL_URL", default_value = DEFAULT_SKILL_URL)]
    pub skill_url: String,

    /// Detached signature for SKILL.md
    #[arg(long, env = "SKILL_SIGNATURE_URL", default_value = DEFAULT_SKILL_SIGNATURE_URL)]
    pub skill_signature_url: String,

    /// Public key used to verify release signatures
    #[arg(long, env = "GPG_KEY_URL", default_value = DEFAULT_GPG_KEY_URL)]
    pub gpg_key_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Upstream release artifact URLs embedded in the install artifact so
/// recipients can verify what the installer fetches.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArtifactSources {
    pub installer_url: String,
    pub skill_url: String,
    pub skill_signature_url: String,
    pub gpg_key_url: String,
}

impl Args {
    pub fn artifact_sources(&self) -> ArtifactSources {
        ArtifactSources {
            installer_url: self.install_script_url.clone(),
            skill_url: self.skill_url.clone(),
            skill_signature_url: self.skill_signature_url.clone(),
            gpg_key_url: self.gpg_key_url.clone(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, url) in [
            ("INSTALL_SCRIPT_URL", &self.install_script_url),
            ("SKILL_URL", &self.skill_url),
            ("SKILL_SIGNATURE_URL", &self.skill_signature_url),
            ("GPG_KEY_URL", &self.gpg_key_url),
        ] {
            if !url.starts_with("https://") {
                return Err(format!("{name} must be an https:// URL, got: {url}"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let args = Args::parse_from(["x0xmd"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.install_script_url, DEFAULT_INSTALL_SCRIPT_URL);
    }

    #[test]
    fn rejects_non_https_installer_source() {
        let args = Args::parse_from([
            "x0xmd",
            "--install-script-url",
            "http://example.test/install.sh",
        ]);
        assert!(args.validate().is_err());
    }
}
