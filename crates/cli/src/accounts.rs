//! Account enumeration from a passwd-format file.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::warn;

/// One account: login name and numeric id (the lastlog slot index).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub uid: u32,
}

/// Parses `name:passwd:uid:gid:gecos:home:shell` lines in file order.
///
/// Blank lines and `#` comments are skipped. Lines without a numeric uid in
/// the third field are skipped with a warning.
pub fn parse_passwd(text: &str) -> Vec<Account> {
    let mut out = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split(':');
        let name = fields.next().unwrap_or("");
        let uid = fields.nth(1).and_then(|f| f.parse::<u32>().ok());

        match uid {
            Some(uid) if !name.is_empty() => out.push(Account {
                name: name.to_string(),
                uid,
            }),
            _ => warn!(line = lineno + 1, "skipping malformed passwd entry"),
        }
    }

    out
}

/// Reads and parses the account database at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Account>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read account database {}", path.display()))?;
    Ok(parse_passwd(&String::from_utf8_lossy(&bytes)))
}

/// Finds the account named by `login`: first as a user name, then as a
/// numeric UID.
///
/// # Errors
///
/// `invalid user input` if `login` is neither a known name nor a number,
/// `Unknown user` if it is a number no account has.
pub fn resolve<'a>(accounts: &'a [Account], login: &str) -> Result<&'a Account> {
    if let Some(a) = accounts.iter().find(|a| a.name == login) {
        return Ok(a);
    }

    let uid: u32 = match login.parse() {
        Ok(uid) => uid,
        Err(_) => bail!("invalid user input: {}", login),
    };

    match accounts.iter().find(|a| a.uid == uid) {
        Some(a) => Ok(a),
        None => bail!("Unknown user: {}", login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWD: &str = "\
root:x:0:0:root:/root:/bin/bash
# comment line
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin

alice:x:1000:1000:Alice,,,:/home/alice:/bin/bash
+::::::
broken:x:notanumber:1::/:/bin/false
1234:x:1001:1001::/home/numeric:/bin/sh
";

    #[test]
    fn parses_valid_entries_in_order() {
        let accts = parse_passwd(PASSWD);
        let names: Vec<&str> = accts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["root", "daemon", "alice", "1234"]);
        assert_eq!(accts[2].uid, 1000);
    }

    #[test]
    fn resolves_by_name_first() {
        let accts = parse_passwd(PASSWD);
        // "1234" is a user name here, not uid 1234
        assert_eq!(resolve(&accts, "1234").unwrap().uid, 1001);
        assert_eq!(resolve(&accts, "alice").unwrap().uid, 1000);
    }

    #[test]
    fn resolves_by_uid() {
        let accts = parse_passwd(PASSWD);
        assert_eq!(resolve(&accts, "0").unwrap().name, "root");
        assert_eq!(resolve(&accts, "1000").unwrap().name, "alice");
    }

    #[test]
    fn unknown_name_is_invalid_input() {
        let accts = parse_passwd(PASSWD);
        let err = resolve(&accts, "mallory").unwrap_err();
        assert_eq!(err.to_string(), "invalid user input: mallory");
    }

    #[test]
    fn unknown_uid_is_unknown_user() {
        let accts = parse_passwd(PASSWD);
        let err = resolve(&accts, "4242").unwrap_err();
        assert_eq!(err.to_string(), "Unknown user: 4242");
    }

    #[test]
    fn load_missing_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("passwd")).unwrap_err();
        assert!(err.to_string().contains("failed to read account database"));
    }
}
