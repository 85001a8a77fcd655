//! Email address helpers: domain and local-part extraction, display masking.
//!
//! An address is well-formed here when it contains exactly one `@`. Anything
//! else yields an empty domain and local part, which can never match a
//! configured domain.

use std::borrow::Cow;

/// Leading characters of the local part left visible by [`EmailMask`].
/// Local parts no longer than this are shown unmasked.
pub const MASK_VISIBLE_PREFIX: usize = 3;

/// What a masked rendering of a malformed address looks like.
pub const INVALID_EMAIL: &str = "invalid-email";

fn split(email: &str) -> Option<(&str, &str)> {
  let (local, domain) = email.split_once('@')?;
  if domain.contains('@') {
    return None;
  }
  Some((local, domain))
}

/// `"local@domain.com"` → `"domain.com"`; `""` when malformed.
pub fn extract_domain(email: &str) -> &str {
  split(email).map(|(_, domain)| domain).unwrap_or_default()
}

/// `"local@domain.com"` → `"local"`; `""` when malformed.
pub fn extract_local_part(email: &str) -> &str {
  split(email).map(|(local, _)| local).unwrap_or_default()
}

// ─── Masking ─────────────────────────────────────────────────────────────────

/// Display-time masking of email addresses.
///
/// Carried explicitly through every renderer and log call that prints an
/// address; there is no process-wide switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailMask {
  enabled: bool,
}

impl Default for EmailMask {
  fn default() -> Self { Self::masked() }
}

impl EmailMask {
  pub fn masked() -> Self { Self { enabled: true } }

  /// Print addresses verbatim (`--nomask`).
  pub fn plain() -> Self { Self { enabled: false } }

  pub fn is_enabled(&self) -> bool { self.enabled }

  /// `"example@domain.com"` → `"exa****@domain.com"`.
  pub fn apply<'a>(&self, email: &'a str) -> Cow<'a, str> {
    if !self.enabled {
      return Cow::Borrowed(email);
    }
    let Some((local, domain)) = split(email) else {
      return Cow::Borrowed(INVALID_EMAIL);
    };

    let len = local.chars().count();
    if len <= MASK_VISIBLE_PREFIX {
      return Cow::Borrowed(email);
    }

    let mut masked: String = local.chars().take(MASK_VISIBLE_PREFIX).collect();
    masked.extend(std::iter::repeat_n('*', len - MASK_VISIBLE_PREFIX));
    masked.push('@');
    masked.push_str(domain);
    Cow::Owned(masked)
  }
}
