use derive_more::Display;

use super::AwayDuration;

pub const UNKNOWN_STATUS_MESSAGE: &str = "other/unknown";

/// Out-of-office state broadcast to the chat channel. Codes outside the known set are
/// kept verbatim so they can still be announced.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Status {
    #[display("HERE")]
    Here,
    #[display("BACK_IN")]
    BackIn,
    #[display("BE_RIGHT_BACK")]
    BeRightBack,
    #[display("GONE_HOME")]
    GoneHome,
    #[display("DO_NOT_DISTURB")]
    DoNotDisturb,
    #[display("YAAAAY")]
    Yaaaay,
    #[display("{_0}")]
    Unknown(String),
}

impl From<&str> for Status {
    fn from(code: &str) -> Self {
        match code {
            "HERE" => Status::Here,
            "BACK_IN" => Status::BackIn,
            "BE_RIGHT_BACK" => Status::BeRightBack,
            "GONE_HOME" => Status::GoneHome,
            "DO_NOT_DISTURB" => Status::DoNotDisturb,
            "YAAAAY" => Status::Yaaaay,
            other => Status::Unknown(other.to_owned()),
        }
    }
}

impl Status {
    /// Human readable message for `user`. BACK_IN needs a duration to be announced,
    /// everything not resolvable falls back to [`UNKNOWN_STATUS_MESSAGE`].
    pub fn message_for(&self, user: &str, duration: Option<AwayDuration>) -> String {
        match (self, duration) {
            (Status::Here, _) => format!("{user} is in the office."),
            (Status::BackIn, Some(duration)) => {
                format!("{user} will be back in {} minutes", duration.rounded_minutes())
            }
            (Status::BeRightBack, _) => format!("{user} will be right back"),
            (Status::GoneHome, _) => format!("{user} has left for the day. Check back tomorrow."),
            (Status::DoNotDisturb, _) => format!("{user} is busy. Please do not disturb."),
            (Status::Yaaaay, _) => format!("{user} wants to tell you that they are happy."),
            (Status::BackIn, None) | (Status::Unknown(_), _) => UNKNOWN_STATUS_MESSAGE.to_owned(),
        }
    }

    pub fn status_line(&self, user: &str, duration: Option<AwayDuration>) -> String {
        format!(
            "*Status Changed for {user} to: {self}*\n{} ",
            self.message_for(user, duration)
        )
    }
}
