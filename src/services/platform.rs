use log::{info, warn};
use serde::{Deserialize, Serialize, Serializer};
use std::{convert::Infallible, fmt, str::FromStr, time::Duration};

/// Operating system identifier as reported by the host's platform info.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Platform {
    Win,
    Mac,
    Linux,
    Android,
    Other(String),
}

impl FromStr for Platform {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "win" => Platform::Win,
            "mac" => Platform::Mac,
            "linux" => Platform::Linux,
            "android" => Platform::Android,
            _ => Platform::Other(s.to_string()),
        })
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(platform) => platform,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Win => f.write_str("win"),
            Platform::Mac => f.write_str("mac"),
            Platform::Linux => f.write_str("linux"),
            Platform::Android => f.write_str("android"),
            Platform::Other(name) => f.write_str(name),
        }
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Asynchronous provider of the host platform.
pub trait PlatformSource {
    fn fetch(&self) -> impl Future<Output = anyhow::Result<Platform>>;
}

/// A platform known up front, e.g. from the config file or command line.
#[derive(Debug, Clone)]
pub struct FixedPlatform(pub Platform);

impl PlatformSource for FixedPlatform {
    async fn fetch(&self) -> anyhow::Result<Platform> {
        Ok(self.0.clone())
    }
}

/// The platform this binary was built for.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatform;

impl HostPlatform {
    fn identify(os: &str) -> Platform {
        match os {
            "windows" => Platform::Win,
            "macos" => Platform::Mac,
            "linux" => Platform::Linux,
            "android" => Platform::Android,
            other => Platform::Other(other.to_string()),
        }
    }
}

impl PlatformSource for HostPlatform {
    async fn fetch(&self) -> anyhow::Result<Platform> {
        Ok(Self::identify(std::env::consts::OS))
    }
}

/// Await the platform, falling back to `None` (default thresholds) when the source
/// fails or takes longer than `timeout`.
pub async fn resolve_platform<P: PlatformSource>(source: &P, timeout: Duration) -> Option<Platform> {
    match tokio::time::timeout(timeout, source.fetch()).await {
        Ok(Ok(platform)) => {
            info!("Host platform: {platform}");
            Some(platform)
        }
        Ok(Err(e)) => {
            warn!("Failed to fetch host platform, using default thresholds: {e}");
            None
        }
        Err(_) => {
            warn!("Host platform not available after {timeout:?}, using default thresholds");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct FailingPlatform;

    impl PlatformSource for FailingPlatform {
        async fn fetch(&self) -> anyhow::Result<Platform> {
            Err(anyhow!("runtime.getPlatformInfo unavailable"))
        }
    }

    struct SlowPlatform(Duration);

    impl PlatformSource for SlowPlatform {
        async fn fetch(&self) -> anyhow::Result<Platform> {
            tokio::time::sleep(self.0).await;
            Ok(Platform::Win)
        }
    }

    #[test]
    fn parses_known_identifiers() {
        assert_eq!(Platform::from("win".to_string()), Platform::Win);
        assert_eq!(Platform::from("MAC".to_string()), Platform::Mac);
        assert_eq!(Platform::from("android".to_string()), Platform::Android);
        assert_eq!(
            Platform::from("cros".to_string()),
            Platform::Other("cros".to_string())
        );
    }

    #[test]
    fn unknown_identifier_keeps_original_text() {
        let platform = Platform::from("CrOS".to_string());
        assert_eq!(platform, Platform::Other("CrOS".to_string()));
        assert_eq!(platform.to_string(), "CrOS");
    }

    #[test]
    fn display_round_trips_identifier() {
        assert_eq!(Platform::Win.to_string(), "win");
        assert_eq!(Platform::Other("fuchsia".to_string()).to_string(), "fuchsia");
    }

    #[test]
    fn maps_build_target_os() {
        assert_eq!(HostPlatform::identify("windows"), Platform::Win);
        assert_eq!(HostPlatform::identify("macos"), Platform::Mac);
        assert_eq!(
            HostPlatform::identify("freebsd"),
            Platform::Other("freebsd".to_string())
        );
    }

    #[tokio::test]
    async fn fixed_platform_resolves() {
        let platform = resolve_platform(&FixedPlatform(Platform::Linux), Duration::from_secs(1)).await;
        assert_eq!(platform, Some(Platform::Linux));
    }

    #[tokio::test]
    async fn failing_source_falls_back_to_none() {
        assert_eq!(
            resolve_platform(&FailingPlatform, Duration::from_secs(1)).await,
            None
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_times_out() {
        let slow = SlowPlatform(Duration::from_secs(5));
        assert_eq!(resolve_platform(&slow, Duration::from_millis(100)).await, None);

        let fast = SlowPlatform(Duration::from_millis(10));
        assert_eq!(
            resolve_platform(&fast, Duration::from_millis(100)).await,
            Some(Platform::Win)
        );
    }
}
