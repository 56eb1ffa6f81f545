//! Interactive account shell
//!
//! Reads commands line by line and walks the user through the same forms
//! the web front end shows: registration, login, and a logout button.

use std::io::{self, BufRead, Write};

use mindsync_core::View;

use crate::commands::auth::{self, AuthResponse, RegisterRequest};
use crate::commands::CommandResult;
use crate::state::AppState;

const HELP: &str = "\
Commands:
  register          create an account
  login             log in with email and password
  logout            end the current session
  status            show who is logged in
  users [email]     list registered users, or look one up
  open <view>       go to landing, login or dashboard
  help              show this message
  quit              leave (ends the session)";

enum Flow {
    Continue,
    Quit,
}

pub struct Shell<R, W> {
    state: AppState,
    input: R,
    output: W,
    view: View,
    /// Read passwords from the terminal without echo
    hide_passwords: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(state: AppState, input: R, output: W) -> Self {
        Self {
            state,
            input,
            output,
            view: View::Landing,
            hide_passwords: false,
        }
    }

    /// Prompt for passwords on the controlling terminal with echo off.
    /// Only meaningful when the input really is that terminal.
    pub fn with_hidden_passwords(mut self, hide: bool) -> Self {
        self.hide_passwords = hide;
        self
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "MindSync - type `help` for commands")?;

        loop {
            write!(self.output, "mindsync {}> ", self.view)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            if let Flow::Quit = self.dispatch(&line)? {
                break;
            }
        }

        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn dispatch(&mut self, line: &str) -> io::Result<Flow> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(Flow::Continue);
        };

        match command {
            "register" => return self.register(),
            "login" => return self.login(),
            "logout" => {
                let result = auth::logout(&self.state);
                self.report(result)?;
            }
            "status" => self.status()?,
            "users" => match parts.next() {
                Some(email) => self.find_user(email)?,
                None => self.users()?,
            },
            "open" => match parts.next().unwrap_or("").parse::<View>() {
                Ok(view) => {
                    let result = auth::open_view(&self.state, view);
                    self.report(result)?;
                }
                Err(e) => writeln!(self.output, "! {e}")?,
            },
            "help" => writeln!(self.output, "{HELP}")?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => writeln!(self.output, "! Unknown command: {other} (try `help`)")?,
        }

        Ok(Flow::Continue)
    }

    fn register(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Full name")? else {
            return Ok(Flow::Quit);
        };
        let Some(email) = self.prompt("Email")? else {
            return Ok(Flow::Quit);
        };
        let Some(password) = self.secret_prompt("Password")? else {
            return Ok(Flow::Quit);
        };
        let Some(confirm_password) = self.secret_prompt("Confirm password")? else {
            return Ok(Flow::Quit);
        };

        let result = auth::register(
            &self.state,
            RegisterRequest {
                name,
                email,
                password,
                confirm_password,
            },
        );
        if result.success {
            writeln!(self.output, "Registration successful! Please log in.")?;
        }
        self.report(result)?;
        Ok(Flow::Continue)
    }

    fn login(&mut self) -> io::Result<Flow> {
        let Some(email) = self.prompt("Email")? else {
            return Ok(Flow::Quit);
        };
        let Some(password) = self.secret_prompt("Password")? else {
            return Ok(Flow::Quit);
        };

        let result = auth::login(&self.state, email, password);
        self.report(result)?;
        Ok(Flow::Continue)
    }

    fn status(&mut self) -> io::Result<()> {
        let status = auth::session_status(&self.state);
        match status.data.and_then(|s| s.user) {
            Some(user) => writeln!(self.output, "Logged in as {} <{}>", user.name, user.email),
            None => writeln!(self.output, "Not logged in"),
        }
    }

    fn users(&mut self) -> io::Result<()> {
        let result = auth::list_users(&self.state);
        match (result.data, result.error) {
            (Some(users), _) if users.is_empty() => writeln!(self.output, "No registered users"),
            (Some(users), _) => {
                for user in users {
                    writeln!(self.output, "{} <{}>", user.name, user.email)?;
                }
                Ok(())
            }
            (None, error) => writeln!(self.output, "! {}", error.unwrap_or_default()),
        }
    }

    fn find_user(&mut self, email: &str) -> io::Result<()> {
        let result = auth::find_user(&self.state, email.to_string());
        match (result.data, result.error) {
            (Some(Some(user)), _) => writeln!(self.output, "{} <{}>", user.name, user.email),
            (Some(None), _) => writeln!(self.output, "No user registered with {email}"),
            (None, error) => writeln!(self.output, "! {}", error.unwrap_or_default()),
        }
    }

    /// Follow a navigation or show the failure modal
    fn report(&mut self, result: CommandResult<AuthResponse>) -> io::Result<()> {
        let Some(response) = result.data else {
            return writeln!(self.output, "! {}", result.error.unwrap_or_default());
        };

        // Paths come from `View::path`, so they always parse
        if let Ok(view) = response.redirect.parse::<View>() {
            self.view = view;
        }
        writeln!(self.output, "-> {}", response.redirect)?;

        if self.view == View::Dashboard {
            if let Some(user) = response.user {
                writeln!(self.output, "Welcome, {}!", user.name)?;
            }
        }
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        self.read_line()
    }

    fn secret_prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        if !self.hide_passwords {
            return self.prompt(label);
        }

        self.output.flush()?;
        match dialoguer::Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
        {
            Ok(secret) => Ok(Some(secret)),
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(io::Error::other(e)),
        }
    }

    /// Next line without its terminator, `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindsync_core::{App, Config};
    use std::io::Cursor;
    use std::path::PathBuf;

    fn run_script(state: &AppState, script: &str) -> (String, View) {
        let mut output = Vec::new();
        let mut shell = Shell::new(state.clone(), Cursor::new(script.as_bytes()), &mut output);
        shell.run().unwrap();
        let view = shell.view();
        drop(shell);
        (String::from_utf8(output).unwrap(), view)
    }

    fn test_state() -> AppState {
        let config = Config::new(PathBuf::from("/tmp/unused")).with_hash_iterations(10);
        AppState::from_app(App::in_memory(config).unwrap())
    }

    #[test]
    fn test_register_and_login_session() {
        let state = test_state();
        let script = "register\nAlice Smith\na@x.com\np1\np1\nlogin\na@x.com\np1\nstatus\n";
        let (output, view) = run_script(&state, script);

        assert!(output.contains("Registration successful!"));
        assert!(output.contains("-> /login"));
        assert!(output.contains("-> /dashboard"));
        assert!(output.contains("Welcome, Alice Smith!"));
        assert!(output.contains("Logged in as Alice Smith <a@x.com>"));
        assert!(output.ends_with("Goodbye.\n"));
        assert_eq!(view, View::Dashboard);
    }

    #[test]
    fn test_failures_show_modal_and_stay_put() {
        let state = test_state();
        let script = "register\nAlice\na@x.com\np1\np2\nlogin\na@x.com\np1\n";
        let (output, view) = run_script(&state, script);

        assert!(output.contains("! Passwords don't match!"));
        assert!(output.contains("! Invalid email or password!"));
        assert!(!output.contains("->"));
        assert_eq!(view, View::Landing);
    }

    #[test]
    fn test_logout_and_guarded_dashboard() {
        let state = test_state();
        let script = "open dashboard\nlogout\nstatus\nusers\nbogus\nquit\nstatus\n";
        let (output, view) = run_script(&state, script);

        assert!(output.contains("-> /login"));
        assert!(output.contains("-> /"));
        assert!(output.contains("Not logged in"));
        assert!(output.contains("No registered users"));
        assert!(output.contains("! Unknown command: bogus"));
        // Nothing after quit runs
        assert_eq!(output.matches("Not logged in").count(), 1);
        assert_eq!(view, View::Landing);
    }

    #[test]
    fn test_users_lookup_by_email() {
        let state = test_state();
        let script = "register\nAlice\na@x.com\np1\np1\nusers a@x.com\nusers b@x.com\nusers\n";
        let (output, _) = run_script(&state, script);

        assert_eq!(output.matches("Alice <a@x.com>").count(), 2);
        assert!(output.contains("No user registered with b@x.com"));
    }

    #[test]
    fn test_whitespace_password_round_trip() {
        let state = test_state();
        let script = "register\nAlice\na@x.com\n   \n   \nlogin\na@x.com\n   \n";
        let (output, view) = run_script(&state, script);

        assert!(output.contains("Welcome, Alice!"));
        assert_eq!(view, View::Dashboard);
    }

    #[test]
    fn test_eof_mid_form_registers_nothing() {
        let state = test_state();
        let (output, _) = run_script(&state, "register\nAlice\na@x.com\n");
        assert!(output.ends_with("Goodbye.\n"));
        assert!(state.app().list_users().unwrap().is_empty());
    }
}
