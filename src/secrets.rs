use std::path::{Path, PathBuf};

const PROVIDERS: [&str; 2] = ["openai", "tavily"];

/// Directory holding `credentials/`: next to the config file when
/// `EASTWING_CONFIG` is set, otherwise `~/.eastwing`.
fn state_dir() -> PathBuf {
    if let Ok(path) = std::env::var("EASTWING_CONFIG") {
        if let Some(parent) = PathBuf::from(path).parent() {
            return parent.to_path_buf();
        }
    }
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".eastwing")
}

#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| anyhow::anyhow!("failed to chmod {mode:o} {}: {e}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> anyhow::Result<()> {
    Ok(())
}

fn normalize_provider(provider: &str) -> anyhow::Result<String> {
    let provider = provider.trim().to_ascii_lowercase();
    if PROVIDERS.contains(&provider.as_str()) {
        Ok(provider)
    } else {
        anyhow::bail!(
            "unsupported provider for key store: {provider} (expected one of {})",
            PROVIDERS.join(", ")
        )
    }
}

fn key_file_path_for(state_dir: &Path, provider: &str) -> anyhow::Result<PathBuf> {
    let provider = normalize_provider(provider)?;
    Ok(state_dir.join("credentials").join(format!("{provider}.key")))
}

pub fn write_key_to(state_dir: &Path, provider: &str, api_key: &str) -> anyhow::Result<PathBuf> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        anyhow::bail!("API key cannot be empty");
    }

    let path = key_file_path_for(state_dir, provider)?;
    let dir = state_dir.join("credentials");
    std::fs::create_dir_all(&dir)
        .map_err(|e| anyhow::anyhow!("failed to create {}: {e}", dir.display()))?;
    restrict_permissions(&dir, 0o700)?;

    std::fs::write(&path, api_key)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
    restrict_permissions(&path, 0o600)?;
    Ok(path)
}

pub fn read_key_from(state_dir: &Path, provider: &str) -> Option<String> {
    let path = key_file_path_for(state_dir, provider).ok()?;
    let value = std::fs::read_to_string(path).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Store a provider API key in ~/.eastwing/credentials/{provider}.key.
pub fn store_api_key(provider: &str, api_key: &str) -> anyhow::Result<PathBuf> {
    write_key_to(&state_dir(), provider, api_key)
}

/// Load a provider API key from ~/.eastwing/credentials/{provider}.key.
pub fn load_api_key(provider: &str) -> Option<String> {
    read_key_from(&state_dir(), provider)
}

#[cfg(test)]
mod tests {
    use super::{read_key_from, write_key_to};
    use std::path::PathBuf;

    fn tmp_dir() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system clock before epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("eastwing-secrets-test-{nanos}"));
        std::fs::create_dir_all(&path).expect("create temp dir");
        path
    }

    #[test]
    fn writes_and_reads_provider_key() {
        let dir = tmp_dir();
        let path = write_key_to(&dir, "openai", "  sk-test\n").expect("write key");
        assert!(path.ends_with("credentials/openai.key"));
        assert_eq!(read_key_from(&dir, "OpenAI").as_deref(), Some("sk-test"));
        assert!(read_key_from(&dir, "tavily").is_none());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn rejects_unknown_provider_and_empty_key() {
        let dir = tmp_dir();
        let err = write_key_to(&dir, "../anthropic", "x").expect_err("should fail");
        assert!(err.to_string().contains("unsupported provider"));
        let err = write_key_to(&dir, "tavily", "   ").expect_err("should fail");
        assert!(err.to_string().contains("cannot be empty"));
        std::fs::remove_dir_all(dir).ok();
    }
}
