//! Account commands: signup, login, logout, whoami

use crate::error::{FilmshelfError, Result};
use crate::session::SessionStore;
use crate::storage::StorageBackend;
use colored::Colorize;

/// Create an account and log in
pub fn signup<B: StorageBackend>(
    session: &mut SessionStore<B>,
    username: &str,
    password: &str,
) -> Result<()> {
    let username = username.trim();
    let mut missing = Vec::new();
    if username.is_empty() {
        missing.push("username");
    }
    if password.is_empty() {
        missing.push("password");
    }
    if !missing.is_empty() {
        return Err(FilmshelfError::Validation(missing.join(", ")).into());
    }

    let user = session.signup(username, password)?;
    println!(
        "{}",
        format!("Welcome, {}! Your account is ready.", user.username).green()
    );
    Ok(())
}

pub fn login<B: StorageBackend>(
    session: &mut SessionStore<B>,
    username: &str,
    password: &str,
    remember: bool,
) -> Result<()> {
    let user = session.login(username.trim(), password, remember)?;
    println!("{}", format!("Logged in as {}", user.username).green());
    if !remember {
        println!(
            "{}",
            "Session is not remembered; use --remember to stay logged in.".dimmed()
        );
    }
    Ok(())
}

pub fn logout<B: StorageBackend>(session: &mut SessionStore<B>) -> Result<()> {
    let was_logged_in = session.is_authenticated();
    session.logout()?;
    if was_logged_in {
        println!("{}", "Logged out.".green());
    } else {
        println!("{}", "Not logged in.".yellow());
    }
    Ok(())
}

pub fn whoami<B: StorageBackend>(session: &SessionStore<B>) -> Result<()> {
    match session.current_user() {
        Some(user) => println!("{}", user.username.cyan()),
        None => println!("{}", "Not logged in.".yellow()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn session() -> SessionStore<MemoryStorage> {
        SessionStore::open(MemoryStorage::new()).unwrap()
    }

    #[test]
    fn test_signup_trims_username() {
        let mut session = session();
        signup(&mut session, "  ana ", "pw").unwrap();
        assert_eq!(session.current_user().unwrap().username, "ana");
    }

    #[test]
    fn test_signup_rejects_blank_fields() {
        let mut session = session();
        let err = signup(&mut session, " ", "").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: username, password"
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_logout_cycle() {
        let mut session = session();
        signup(&mut session, "ana", "pw").unwrap();
        logout(&mut session).unwrap();
        assert!(!session.is_authenticated());

        assert!(login(&mut session, "ana", "wrong", false).is_err());
        login(&mut session, "ana", "pw", false).unwrap();
        assert!(session.is_authenticated());

        logout(&mut session).unwrap();
        logout(&mut session).unwrap();
        assert!(whoami(&session).is_ok());
    }
}
