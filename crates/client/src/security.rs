//! Security utilities for building request URLs.
//!
//! Caller-provided values (basket ids, item names, customer ids) end up in
//! URL paths. They MUST be encoded so they cannot break out of their path
//! segment or inject query parameters. Values that URL resolution would
//! treat as dot segments (`.`, `..`) or collapse (empty) are rejected.
//!
//! ```rust
//! use checkout_api_client::security::url;
//!
//! let path = url::fill_template("baskets/{0}/items/{1}", &["b1", "Diet Coke/2L"]).unwrap();
//! assert_eq!(path, "baskets/b1/items/Diet%20Coke%2F2L");
//! assert!(url::fill_template("customers/{0}", &[".."]).is_err());
//! ```

/// URL encoding utilities for parameter safety.
pub mod url {
    use crate::error::{Error, ErrorKind, Result};

    /// URL-encode a parameter value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use checkout_api_client::security::url;
    ///
    /// assert_eq!(url::encode_param("cust_1/../../secret"), "cust_1%2F..%2F..%2Fsecret");
    /// ```
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Returns true if `value` stays a single path segment once encoded.
    ///
    /// Empty values and the dot segments `.`/`..` are unsafe: URL parsing
    /// drops or resolves them, retargeting the request at another resource.
    #[must_use]
    pub fn is_safe_segment(value: &str) -> bool {
        !matches!(value, "" | "." | "..")
    }

    /// Replace positional `{N}` placeholders in `template` with encoded `args`.
    ///
    /// Placeholders without a matching argument are left untouched. Fails
    /// with [`ErrorKind::InvalidUrl`] if any argument is not a safe segment.
    pub fn fill_template(template: &str, args: &[&str]) -> Result<String> {
        if let Some(bad) = args.iter().find(|arg| !is_safe_segment(arg)) {
            return Err(Error::new(ErrorKind::InvalidUrl(format!(
                "'{}' is not a valid path segment",
                bad
            ))));
        }

        let mut out = String::with_capacity(template.len() + 16);
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let substituted = after.find('}').and_then(|close| {
                let index: usize = after[..close].parse().ok()?;
                let arg = args.get(index)?;
                Some((encode_param(arg), close))
            });

            match substituted {
                Some((encoded, close)) => {
                    out.push_str(&encoded);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}
