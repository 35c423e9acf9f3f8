//! Cookie session settings read from the environment.
//!
//! | Variable                  | Values                  | Debug default  |
//! |---------------------------|-------------------------|----------------|
//! | `SESSION_KEY_FILE`        | path                    | `/var/run/secrets/session_key` |
//! | `SESSION_COOKIE_SECURE`   | `1`/`0`/`true`/`false`  | secure         |
//! | `SESSION_SAMESITE`        | `Strict`/`Lax`/`None`   | `Lax`          |
//! | `SESSION_ALLOW_EPHEMERAL` | `1`/`0`/`true`/`false`  | disabled       |
//!
//! Debug builds fall back to the defaults with a warning. Release builds
//! require every toggle, a key file of at least 64 bytes, and reject
//! `SameSite=None` on insecure cookies.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const DEFAULT_KEY_PATH: &str = "/var/run/secrets/session_key";
/// Minimum key file length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
// `Key::derive_from` panics below this length.
const KEY_DERIVE_MIN_LEN: usize = 32;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Whether missing or invalid toggles are tolerated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// The mode matching the current compilation profile.
    ///
    /// ```rust
    /// use fleet_backend::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) { BuildMode::Debug } else { BuildMode::Release };
    /// assert_eq!(BuildMode::current(), expected);
    /// ```
    #[must_use]
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Resolved cookie session configuration.
pub struct SessionSettings {
    /// Key used to encrypt and sign session cookies.
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Reasons the session configuration is unusable.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read and validate session settings.
///
/// # Examples
///
/// ```rust
/// use fleet_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_KEY_FILE" => Some("/nonexistent/session_key".to_owned()),
///     _ => None,
/// });
///
/// // Debug builds fall back to a temporary key and secure cookies.
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("lenient");
/// assert!(settings.cookie_secure);
/// ```
///
/// # Errors
/// Release builds fail on any missing, invalid or insecure toggle and on an
/// unreadable or short key file.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = read_toggle(env, mode, COOKIE_SECURE_ENV, BOOL_EXPECTED, parse_bool, true)?;
    let same_site = resolve_same_site(env, mode, cookie_secure)?;
    let allow_ephemeral =
        read_toggle(env, mode, ALLOW_EPHEMERAL_ENV, BOOL_EXPECTED, parse_bool, false)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = load_key(env, mode, allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Parse one variable, using `fallback` in debug builds when it is missing or
/// unparsable.
fn read_toggle<E: Env, T>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
    fallback: T,
) -> Result<T, SessionConfigError> {
    let Some(value) = env.string(name) else {
        if mode == BuildMode::Release {
            return Err(SessionConfigError::MissingEnv { name });
        }
        warn!(variable = name, "session toggle not set; using default");
        return Ok(fallback);
    };
    match parse(&value) {
        Some(parsed) => Ok(parsed),
        None if mode == BuildMode::Release => Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected,
        }),
        None => {
            warn!(variable = name, value = %value, "invalid session toggle; using default");
            Ok(fallback)
        }
    }
}

fn resolve_same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = match mode {
        BuildMode::Debug => SameSite::Lax,
        BuildMode::Release => SameSite::Strict,
    };
    let same_site = read_toggle(env, mode, SAMESITE_ENV, SAMESITE_EXPECTED, parse_same_site, fallback)?;
    if same_site == SameSite::None && !cookie_secure {
        if mode == BuildMode::Release {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
        warn!("SESSION_SAMESITE=None on insecure cookies; browsers may drop the session");
    }
    Ok(same_site)
}

fn load_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| DEFAULT_KEY_PATH.to_owned()),
    );
    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) if mode == BuildMode::Debug || allow_ephemeral => {
            warn!(path = %path.display(), error = %source, "using a temporary session key");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };
    let length = bytes.len();
    let result = if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
        Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_len: SESSION_KEY_MIN_LEN,
        })
    } else if length < KEY_DERIVE_MIN_LEN {
        warn!(path = %path.display(), length, "session key too short to derive from; using a temporary key");
        Ok(Key::generate())
    } else {
        Ok(Key::derive_from(&bytes))
    };
    bytes.zeroize();
    result
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::{fixture, rstest};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn key_file(len: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&vec![b'k'; len]).expect("write key");
        file
    }

    fn env_with(vars: HashMap<&'static str, String>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .returning(move |name| vars.get(name).cloned());
        env
    }

    #[fixture]
    fn release_key() -> NamedTempFile {
        key_file(SESSION_KEY_MIN_LEN)
    }

    fn strict_vars(key: &NamedTempFile) -> HashMap<&'static str, String> {
        HashMap::from([
            (KEY_FILE_ENV, key.path().to_string_lossy().into_owned()),
            (COOKIE_SECURE_ENV, "1".to_owned()),
            (SAMESITE_ENV, "Strict".to_owned()),
            (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
        ])
    }

    #[rstest]
    fn release_accepts_complete_configuration(release_key: NamedTempFile) {
        let env = env_with(strict_vars(&release_key));
        let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
    }

    #[rstest]
    #[case(COOKIE_SECURE_ENV)]
    #[case(SAMESITE_ENV)]
    #[case(ALLOW_EPHEMERAL_ENV)]
    fn release_requires_every_toggle(release_key: NamedTempFile, #[case] missing: &'static str) {
        let mut vars = strict_vars(&release_key);
        vars.remove(missing);
        let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
            .err()
            .expect("missing toggle");
        assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
    }

    #[rstest]
    #[case(COOKIE_SECURE_ENV, "maybe")]
    #[case(SAMESITE_ENV, "sometimes")]
    fn release_rejects_unparsable_toggles(
        release_key: NamedTempFile,
        #[case] name: &'static str,
        #[case] value: &str,
    ) {
        let mut vars = strict_vars(&release_key);
        vars.insert(name, value.to_owned());
        let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
            .err()
            .expect("invalid toggle");
        assert!(matches!(err, SessionConfigError::InvalidEnv { name: bad, .. } if bad == name));
    }

    #[rstest]
    fn release_rejects_same_site_none_without_secure(release_key: NamedTempFile) {
        let mut vars = strict_vars(&release_key);
        vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
        vars.insert(SAMESITE_ENV, "None".to_owned());
        let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
            .err()
            .expect("insecure");
        assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
    }

    #[rstest]
    fn release_rejects_ephemeral_keys(release_key: NamedTempFile) {
        let mut vars = strict_vars(&release_key);
        vars.insert(ALLOW_EPHEMERAL_ENV, "1".to_owned());
        let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
            .err()
            .expect("ephemeral");
        assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
    }

    #[rstest]
    fn release_rejects_short_keys() {
        let short = key_file(SESSION_KEY_MIN_LEN - 1);
        let err = session_settings_from_env(&env_with(strict_vars(&short)), BuildMode::Release)
            .err()
            .expect("short key");
        assert!(matches!(
            err,
            SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
        ));
    }

    #[rstest]
    fn release_requires_readable_key(release_key: NamedTempFile) {
        let mut vars = strict_vars(&release_key);
        vars.insert(KEY_FILE_ENV, "/nonexistent/fleet/session_key".to_owned());
        let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
            .err()
            .expect("unreadable key");
        assert!(matches!(err, SessionConfigError::KeyRead { .. }));
    }

    #[rstest]
    fn debug_falls_back_to_lenient_defaults() {
        let vars = HashMap::from([
            (KEY_FILE_ENV, "/nonexistent/fleet/session_key".to_owned()),
            (SAMESITE_ENV, "sideways".to_owned()),
        ]);
        let settings =
            session_settings_from_env(&env_with(vars), BuildMode::Debug).expect("lenient");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }

    #[rstest]
    #[case("1", Some(true))]
    #[case(" YES ", Some(true))]
    #[case("false", Some(false))]
    #[case("", None)]
    fn booleans_accept_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }

    #[rstest]
    fn process_environment_feeds_release_settings(release_key: NamedTempFile) {
        let vars = strict_vars(&release_key)
            .into_iter()
            .map(|(name, value)| (name, Some(value)));
        let _guard = env_lock::lock_env(vars);

        let settings =
            session_settings_from_env(&mockable::DefaultEnv::new(), BuildMode::Release)
                .expect("valid");

        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
    }
}
