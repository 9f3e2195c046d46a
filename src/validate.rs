use std::{fmt::Display, net::IpAddr, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::entry::Entry;

/// maximum length of a domain name in its textual form without the trailing dot
const MAX_DOMAIN_LEN: usize = 253;

/// a single DNS label: letters, digits, underscores and inner hyphens, 1 to 63 chars
static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9_](?:[a-z0-9_-]{0,61}[a-z0-9_])?$").expect("label regex is valid")
});

static KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9._-]+$").expect("keyword regex is valid"));

/// prefixes a bare pattern may carry in front of the domain name
const WILDCARD_PREFIXES: [&str; 3] = ["*.", "+.", "."];

/// RuleType lists the rule kinds a Clash/Mihomo rule provider understands
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleType {
    Domain,
    DomainSuffix,
    DomainKeyword,
    Geoip,
    IpCidr,
    IpCidr6,
    SrcIpCidr,
    ProcessName,
    ProcessPath,
    RuleSet,
    UserAgent,
    UrlRegex,
    And,
    Or,
    Not,
    In,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Domain => "DOMAIN",
            RuleType::DomainSuffix => "DOMAIN-SUFFIX",
            RuleType::DomainKeyword => "DOMAIN-KEYWORD",
            RuleType::Geoip => "GEOIP",
            RuleType::IpCidr => "IP-CIDR",
            RuleType::IpCidr6 => "IP-CIDR6",
            RuleType::SrcIpCidr => "SRC-IP-CIDR",
            RuleType::ProcessName => "PROCESS-NAME",
            RuleType::ProcessPath => "PROCESS-PATH",
            RuleType::RuleSet => "RULE-SET",
            RuleType::UserAgent => "USER-AGENT",
            RuleType::UrlRegex => "URL-REGEX",
            RuleType::And => "AND",
            RuleType::Or => "OR",
            RuleType::Not => "NOT",
            RuleType::In => "IN",
        }
    }

    /// rule values of these types are domain names and compare case-insensitively
    pub fn is_domain(&self) -> bool {
        matches!(self, RuleType::Domain | RuleType::DomainSuffix)
    }
}

impl FromStr for RuleType {
    type Err = InvalidReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule_type = match s.to_ascii_uppercase().as_str() {
            "DOMAIN" => RuleType::Domain,
            "DOMAIN-SUFFIX" => RuleType::DomainSuffix,
            "DOMAIN-KEYWORD" => RuleType::DomainKeyword,
            "GEOIP" => RuleType::Geoip,
            "IP-CIDR" => RuleType::IpCidr,
            "IP-CIDR6" => RuleType::IpCidr6,
            "SRC-IP-CIDR" => RuleType::SrcIpCidr,
            "PROCESS-NAME" => RuleType::ProcessName,
            "PROCESS-PATH" => RuleType::ProcessPath,
            "RULE-SET" => RuleType::RuleSet,
            "USER-AGENT" => RuleType::UserAgent,
            "URL-REGEX" => RuleType::UrlRegex,
            "AND" => RuleType::And,
            "OR" => RuleType::Or,
            "NOT" => RuleType::Not,
            "IN" => RuleType::In,
            _ => return Err(InvalidReason::UnknownRuleType(s.to_string())),
        };
        Ok(rule_type)
    }
}

impl Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// InvalidReason explains why an entry failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("empty domain name")]
    Empty,
    #[error("domain name contains non-ASCII characters")]
    NotAscii,
    #[error("domain name is {0} characters long (max 253)")]
    TooLong(usize),
    #[error("empty label")]
    EmptyLabel,
    #[error("invalid label '{0}'")]
    BadLabel(String),
    #[error("domain name needs at least two labels")]
    SingleLabel,
    #[error("top-level label '{0}' is numeric")]
    NumericTld(String),
    #[error("invalid keyword '{0}'")]
    BadKeyword(String),
    #[error("invalid CIDR '{0}'")]
    BadCidr(String),
    #[error("'{0}' is not an IPv6 network")]
    NotIpv6(String),
    #[error("invalid GEOIP code '{0}'")]
    BadGeoip(String),
    #[error("unknown rule type '{0}'")]
    UnknownRuleType(String),
    #[error("missing value for rule type '{0}'")]
    MissingValue(String),
}

/// checks a fully qualified domain name without wildcard prefix
///
/// * `name`: the lower-cased domain name
pub fn validate_domain(name: &str) -> Result<(), InvalidReason> {
    if name.is_empty() {
        return Err(InvalidReason::Empty);
    }
    if !name.is_ascii() {
        return Err(InvalidReason::NotAscii);
    }
    if name.len() > MAX_DOMAIN_LEN {
        return Err(InvalidReason::TooLong(name.len()));
    }
    let labels: Vec<&str> = name.split('.').collect();
    for label in labels.iter() {
        if label.is_empty() {
            return Err(InvalidReason::EmptyLabel);
        }
        if !LABEL_RE.is_match(label) {
            return Err(InvalidReason::BadLabel(label.to_string()));
        }
    }
    if labels.len() < 2 {
        return Err(InvalidReason::SingleLabel);
    }
    // rules out dotted IPv4 addresses posing as domains
    if let Some(tld) = labels.last() {
        if tld.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidReason::NumericTld(tld.to_string()));
        }
    }
    Ok(())
}

/// checks a bare list pattern which may start with one wildcard prefix
pub fn validate_pattern(pattern: &str) -> Result<(), InvalidReason> {
    let name = WILDCARD_PREFIXES
        .iter()
        .find_map(|p| pattern.strip_prefix(p))
        .unwrap_or(pattern);
    validate_domain(name)
}

/// checks `addr/prefix` notation
///
/// * `value`: the network in CIDR notation
/// * `v6_only`: reject IPv4 networks
pub fn validate_cidr(value: &str, v6_only: bool) -> Result<(), InvalidReason> {
    let bad = || InvalidReason::BadCidr(value.to_string());
    let (addr, prefix) = value.split_once('/').ok_or_else(bad)?;
    let addr: IpAddr = addr.parse().map_err(|_| bad())?;
    let prefix: u8 = prefix.parse().map_err(|_| bad())?;
    let max_prefix = match addr {
        IpAddr::V4(_) if v6_only => return Err(InvalidReason::NotIpv6(value.to_string())),
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    };
    if prefix > max_prefix {
        return Err(bad());
    }
    Ok(())
}

/// validates an entry according to its shape and rule type
pub fn validate_entry(entry: &Entry) -> Result<(), InvalidReason> {
    let rule_type = match entry.rule_type.as_deref() {
        None => return validate_pattern(&entry.value),
        Some(t) => RuleType::from_str(t)?,
    };
    if entry.value.is_empty() {
        return Err(InvalidReason::MissingValue(rule_type.to_string()));
    }
    match rule_type {
        RuleType::Domain | RuleType::DomainSuffix => validate_domain(&entry.value),
        RuleType::DomainKeyword => {
            if KEYWORD_RE.is_match(&entry.value.to_ascii_lowercase()) {
                Ok(())
            } else {
                Err(InvalidReason::BadKeyword(entry.value.clone()))
            }
        }
        RuleType::IpCidr | RuleType::SrcIpCidr => validate_cidr(&entry.value, false),
        RuleType::IpCidr6 => validate_cidr(&entry.value, true),
        RuleType::Geoip => {
            if entry.value.chars().all(|c| c.is_ascii_alphanumeric()) {
                Ok(())
            } else {
                Err(InvalidReason::BadGeoip(entry.value.clone()))
            }
        }
        _ => Ok(()),
    }
}
