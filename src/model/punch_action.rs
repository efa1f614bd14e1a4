use strum_macros::{Display, EnumString};

/// The two tokens the punch form may submit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PunchAction {
    CheckIn,
    CheckOut,
}

/// What a punch actually did to the employee's shifts.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PunchOutcome {
    ShiftOpened(i64),
    ShiftClosed,
    /// Check-out with no open shift; nothing was written.
    NothingToClose,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_the_two_form_tokens() {
        assert_eq!("check_in".parse::<PunchAction>(), Ok(PunchAction::CheckIn));
        assert_eq!("check_out".parse::<PunchAction>(), Ok(PunchAction::CheckOut));
        assert!("CHECK_IN".parse::<PunchAction>().is_err());
        assert!("checkin".parse::<PunchAction>().is_err());
        assert!("".parse::<PunchAction>().is_err());
    }

    #[test]
    fn displays_as_form_token() {
        assert_eq!(PunchAction::CheckOut.to_string(), "check_out");
    }
}
