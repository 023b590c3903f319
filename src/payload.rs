use std::str::FromStr;

use thiserror::Error;

// Wi-Fi network config
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Error)]
pub enum WifiParseError {
    #[error("Config doesn't start with WIFI:")]
    InvalidPrefix,
    #[error("Field is unterminated or too short")]
    InvalidFieldFormat,
    #[error("Field holds an invalid value")]
    InvalidFieldData,
    #[error("Unknown field type")]
    InvalidFieldType,
    #[error("Field type appears more than once")]
    DuplicateFieldType,
    #[error("Config doesn't end with ;;")]
    InvalidTermination,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum WifiEncryption {
    #[default]
    None,
    Wep,
    Wpa,
}

impl WifiEncryption {
    fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Wep => "WEP",
            Self::Wpa => "WPA",
        }
    }
}

/// Network credentials in the `WIFI:S:<ssid>;T:<WEP|WPA|>;P:<password>;H:<true|false|>;;`
/// form understood by phone cameras. `\;,":` are backslash escaped inside
/// ssid and password.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct WifiConfig {
    pub ssid: String,
    pub password: String,
    pub encryption: WifiEncryption,
    pub hidden: bool,
}

impl WifiConfig {
    pub fn parse(config: &str) -> Result<Self, WifiParseError> {
        let body = match config.strip_prefix(WIFI_PREFIX) {
            Some(b) if !b.is_empty() => b,
            _ => return Err(WifiParseError::InvalidPrefix),
        };

        let mut ssid: Option<String> = None;
        let mut password: Option<String> = None;
        let mut encryption: Option<WifiEncryption> = None;
        let mut hidden: Option<bool> = None;

        let mut start = 0;
        while start + 1 < body.len() {
            let off = field_end(&body[start..]).ok_or(WifiParseError::InvalidFieldFormat)?;
            let end = start + off;
            let field = &body[start..end];
            if field.len() < 2 {
                return Err(WifiParseError::InvalidFieldFormat);
            }

            let (kind, value) = match field.get(..2).zip(field.get(2..)) {
                Some(kv) => kv,
                None => return Err(WifiParseError::InvalidFieldType),
            };
            match kind {
                "S:" => {
                    let s = unescape(value).filter(|s| !s.is_empty());
                    set_once(&mut ssid, s.ok_or(WifiParseError::InvalidFieldData)?)?;
                }
                "T:" => {
                    let e = match value {
                        "" => WifiEncryption::None,
                        "WEP" => WifiEncryption::Wep,
                        "WPA" => WifiEncryption::Wpa,
                        _ => return Err(WifiParseError::InvalidFieldData),
                    };
                    set_once(&mut encryption, e)?;
                }
                "P:" => {
                    let p = unescape(value).ok_or(WifiParseError::InvalidFieldData)?;
                    set_once(&mut password, p)?;
                }
                "H:" => {
                    let h = match value {
                        "" | "false" => false,
                        "true" => true,
                        _ => return Err(WifiParseError::InvalidFieldData),
                    };
                    set_once(&mut hidden, h)?;
                }
                _ => return Err(WifiParseError::InvalidFieldType),
            }
            start = end + 1;
        }

        let ssid = ssid.ok_or(WifiParseError::InvalidFieldData)?;
        let password = password.unwrap_or_default();
        let encryption = encryption.unwrap_or_default();
        if password.is_empty() && encryption != WifiEncryption::None {
            return Err(WifiParseError::InvalidFieldData);
        }
        if !config.ends_with(";;") {
            return Err(WifiParseError::InvalidTermination);
        }

        Ok(Self { ssid, password, encryption, hidden: hidden.unwrap_or(false) })
    }

    /// Escaped config text, ready to be encoded in a byte mode code.
    pub fn to_config_string(&self) -> String {
        format!(
            "{WIFI_PREFIX}S:{};T:{};P:{};H:{};;",
            escape(&self.ssid),
            self.encryption.as_str(),
            escape(&self.password),
            self.hidden
        )
    }
}

impl FromStr for WifiConfig {
    type Err = WifiParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> Result<(), WifiParseError> {
    if slot.is_some() {
        return Err(WifiParseError::DuplicateFieldType);
    }
    *slot = Some(value);
    Ok(())
}

// Offset of the first unescaped ';'. A backslash escapes the next character
// only, so "\\;" still ends the field.
fn field_end(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'\\' => escaped = !escaped,
            b';' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

fn escape(raw: &str) -> String {
    let mut res = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if SPECIAL_CHARS.contains(ch) {
            res.push('\\');
        }
        res.push(ch);
    }
    res
}

// None when the value is a lone special character
fn unescape(escaped: &str) -> Option<String> {
    if escaped.chars().count() == 1 && SPECIAL_CHARS.contains(escaped) {
        return None;
    }

    let mut res = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next_if(|&n| SPECIAL_CHARS.contains(n)) {
                res.push(next);
                continue;
            }
        }
        res.push(ch);
    }
    Some(res)
}


// Global constants
//------------------------------------------------------------------------------

static WIFI_PREFIX: &str = "WIFI:";

static SPECIAL_CHARS: &str = "\\;,\":";
