//! Interactive menu loop
//!
//! Drives the contact store, chat log and reply selector from console
//! input. All session state lives in [`Session`]; the console is any
//! `BufRead`/`Write` pair so the loop runs the same against stdin/stdout
//! and in-memory buffers.

use crate::chatlog::{ChatLog, Direction};
use crate::contacts::ContactStore;
use crate::error::{Error, Result};
use crate::reply::ReplySelector;
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Sentinel that ends a chat, compared case-insensitively
pub const EXIT_SENTINEL: &str = "exit";

/// Where the loop is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Menu,
    AddContact,
    ListContacts,
    /// Chatting with the named contact
    ChatActive(String),
    Exit,
}

/// Owned state of one interactive session
pub struct Session<I, O, R> {
    store: ContactStore,
    chat_log: ChatLog,
    replies: ReplySelector<R>,
    input: I,
    output: O,
    state: State,
}

impl<I: BufRead, O: Write, R: Rng> Session<I, O, R> {
    pub fn new(
        store: ContactStore,
        chat_log: ChatLog,
        replies: ReplySelector<R>,
        input: I,
        output: O,
    ) -> Self {
        Self {
            store,
            chat_log,
            replies,
            input,
            output,
            state: State::Menu,
        }
    }

    /// Run until the user picks "Exit" or input ends
    pub fn run(&mut self) -> Result<()> {
        while self.state != State::Exit {
            self.step()?;
        }
        Ok(())
    }

    /// Handle one state and move to the next
    pub fn step(&mut self) -> Result<()> {
        let next = match self.state.clone() {
            State::Menu => self.menu()?,
            State::AddContact => self.add_contact()?,
            State::ListContacts => self.list_contacts()?,
            State::ChatActive(contact) => self.chat_turn(&contact)?,
            State::Exit => State::Exit,
        };
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(())
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn chat_log(&self) -> &ChatLog {
        &self.chat_log
    }

    /// Give back the console output
    pub fn into_output(self) -> O {
        self.output
    }

    fn menu(&mut self) -> Result<State> {
        writeln!(self.output, "\nMenu:")?;
        writeln!(self.output, "1. Add a contact")?;
        writeln!(self.output, "2. List contacts")?;
        writeln!(self.output, "3. Chat with a contact")?;
        writeln!(self.output, "4. Exit")?;

        let Some(choice) = self.prompt("Choose an option (1-4): ")? else {
            return Ok(State::Exit);
        };

        let next = match choice.as_str() {
            "1" => State::AddContact,
            "2" => State::ListContacts,
            "3" => self.choose_chat_contact()?,
            "4" => {
                writeln!(self.output, "Goodbye!")?;
                State::Exit
            }
            _ => {
                writeln!(self.output, "Invalid option. Please try again.")?;
                State::Menu
            }
        };
        Ok(next)
    }

    fn add_contact(&mut self) -> Result<State> {
        let Some(name) = self.prompt("Enter the contact name: ")? else {
            return Ok(State::Exit);
        };
        let Some(number) = self.prompt("Enter the contact number: ")? else {
            return Ok(State::Exit);
        };

        if let Some(previous) = self.store.add(&name, &number)? {
            info!("Overwrote contact '{}' (was '{}')", name, previous);
        } else {
            info!("Added contact '{}'", name);
        }
        writeln!(
            self.output,
            "Contact '{}' with number '{}' added.",
            name, number
        )?;
        Ok(State::Menu)
    }

    fn list_contacts(&mut self) -> Result<State> {
        writeln!(self.output, "\n{}", self.store.listing())?;
        Ok(State::Menu)
    }

    fn choose_chat_contact(&mut self) -> Result<State> {
        if self.store.is_empty() {
            writeln!(self.output, "No contacts available to chat with.")?;
            return Ok(State::Menu);
        }

        let Some(name) = self.prompt("Enter the contact name to chat with: ")? else {
            return Ok(State::Exit);
        };

        match self.store.lookup(&name) {
            Ok(_) => {
                writeln!(
                    self.output,
                    "\nStarting chat with {}. Type '{}' to end the chat.",
                    name, EXIT_SENTINEL
                )?;
                info!("Chat started with '{}'", name);
                Ok(State::ChatActive(name))
            }
            Err(Error::ContactNotFound(name)) => {
                writeln!(self.output, "Contact '{}' not found.", name)?;
                Ok(State::Menu)
            }
            Err(e) => Err(e),
        }
    }

    fn chat_turn(&mut self, contact: &str) -> Result<State> {
        let Some(message) = self.prompt("You: ")? else {
            return Ok(State::Exit);
        };

        if message.eq_ignore_ascii_case(EXIT_SENTINEL) {
            writeln!(self.output, "Ending chat.")?;
            info!("Chat ended with '{}'", contact);
            return Ok(State::Menu);
        }

        self.chat_log
            .append(contact, &format!("You: {}", message), Direction::Outgoing)?;

        let reply = self.replies.select_reply(&message);
        let line = format!("{}: {}", contact, reply);
        writeln!(self.output, "{}", line)?;
        self.chat_log.append(contact, &line, Direction::Incoming)?;

        Ok(State::ChatActive(contact.to_string()))
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("End of input");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
