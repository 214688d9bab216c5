//! Parsing operator input lines into console commands.
//!
//! A leading `/` is accepted so the bot-style spellings (`/requests`,
//! `/stats`, `/menu`) work alongside the bare words.

use crate::operations::{
    AppBlockReason, CardBlockReason, DeliveryType, FormOption, OperationForm, OperationKind,
};
use crate::types::{QueueFilter, RequestId};
use thiserror::Error;

/// A parsed console command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Queue listing; every request unless filtered
    Requests(Option<QueueFilter>),
    /// Full card for one request
    Show(RequestId),
    /// Move a request to processing
    Take(RequestId),
    /// Open the completion dialog and confirm it
    Complete {
        /// Request to complete
        id: RequestId,
        /// Dialog comment, possibly empty
        comment: String,
    },
    /// Audit log tab
    Audit,
    /// Header tiles and analytics tab
    Stats,
    /// Operation forms overview
    Operations,
    /// Submit a filled operation form
    Submit(OperationForm),
    /// Command list
    Help,
    /// Leave the console
    Quit,
}

/// Errors from parsing an input line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Blank line
    #[error("empty command")]
    Empty,
    /// First word is not a command
    #[error("unknown command `{0}`")]
    Unknown(String),
    /// A required argument is missing
    #[error("missing {what}; usage: {usage}")]
    MissingArgument {
        /// Which argument
        what: &'static str,
        /// Usage line for the command
        usage: &'static str,
    },
    /// A drop-down value is not one of the allowed options
    #[error("unknown {what} `{value}`; expected one of: {allowed}")]
    UnknownOption {
        /// Which field
        what: &'static str,
        /// Rejected value
        value: String,
        /// Allowed values, comma separated
        allowed: String,
    },
}

struct Args<'a> {
    words: std::str::SplitWhitespace<'a>,
    usage: &'static str,
}

impl<'a> Args<'a> {
    fn next(&mut self, what: &'static str) -> Result<&'a str, CommandError> {
        self.words.next().ok_or(CommandError::MissingArgument {
            what,
            usage: self.usage,
        })
    }

    fn option<T: FormOption>(&mut self, what: &'static str) -> Result<T, CommandError> {
        let value = self.next(what)?;
        T::from_value(value).ok_or_else(|| CommandError::UnknownOption {
            what,
            value: value.to_string(),
            allowed: T::ALL
                .iter()
                .map(|option| option.value())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Everything left, joined by single spaces
    fn rest(self) -> String {
        self.words.collect::<Vec<_>>().join(" ")
    }

    fn rest_required(self, what: &'static str) -> Result<String, CommandError> {
        let usage = self.usage;
        let rest = self.rest();
        if rest.is_empty() {
            Err(CommandError::MissingArgument { what, usage })
        } else {
            Ok(rest)
        }
    }
}

const SHOW_USAGE: &str = "show <id>";
const TAKE_USAGE: &str = "take <id>";
const COMPLETE_USAGE: &str = "complete <id> [комментарий]";

impl Command {
    /// Parses one input line
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] for blank lines, unknown commands, and
    /// missing or invalid arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Err(CommandError::Empty);
        };
        let name = first.strip_prefix('/').unwrap_or(first).to_lowercase();
        let args = |usage: &'static str| Args {
            words: words.clone(),
            usage,
        };

        let command = match name.as_str() {
            "requests" | "queue" => match words.clone().next() {
                Some(badge) => Self::Requests(Some(badge.parse().map_err(|_| {
                    CommandError::UnknownOption {
                        what: "filter",
                        value: badge.to_string(),
                        allowed: "active, high, medium, low, pending, processing, completed"
                            .to_string(),
                    }
                })?)),
                None => Self::Requests(None),
            },
            "show" => Self::Show(RequestId::new(args(SHOW_USAGE).next("request id")?)),
            "take" => Self::Take(RequestId::new(args(TAKE_USAGE).next("request id")?)),
            "complete" => {
                let mut args = args(COMPLETE_USAGE);
                let id = RequestId::new(args.next("request id")?);
                Self::Complete {
                    id,
                    comment: args.rest(),
                }
            },
            "audit" => Self::Audit,
            "stats" => Self::Stats,
            "ops" | "operations" => Self::Operations,
            "block-card" => {
                let mut args = args(OperationKind::CardBlock.usage());
                Self::Submit(OperationForm::CardBlock {
                    card_number: args.next("card number")?.to_string(),
                    phone: args.next("phone")?.to_string(),
                    reason: args.option::<CardBlockReason>("reason")?,
                })
            },
            "block-app" => {
                let mut args = args(OperationKind::AppBlock.usage());
                Self::Submit(OperationForm::AppBlock {
                    phone: args.next("phone")?.to_string(),
                    reason: args.option::<AppBlockReason>("reason")?,
                    recovery_email: args.next("email")?.to_string(),
                })
            },
            "reissue" => {
                let mut args = args(OperationKind::CardReissue.usage());
                let card_number = args.next("card number")?.to_string();
                let phone = args.next("phone")?.to_string();
                let delivery = args.option::<DeliveryType>("delivery")?;
                Self::Submit(OperationForm::CardReissue {
                    card_number,
                    phone,
                    delivery_address: args.rest_required("delivery address")?,
                    delivery,
                })
            },
            "lookup" => Self::Submit(OperationForm::ClientLookup {
                query: args(OperationKind::ClientLookup.usage())
                    .rest_required("phone or card number")?,
            }),
            "menu" | "help" | "start" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(first.to_string())),
        };
        Ok(command)
    }
}
