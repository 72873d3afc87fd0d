use std::collections::HashMap;

/// Voice command, one variant per handled intent name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Here,
    BeRightBack,
    GoneHome,
    DoNotDisturb,
    BackIn,
    Yaaaay,
    Help,
    Unrecognized(String),
}

impl From<&str> for Intent {
    fn from(name: &str) -> Self {
        match name {
            "HERE" => Intent::Here,
            "BE_RIGHT_BACK" => Intent::BeRightBack,
            "GONE_HOME" => Intent::GoneHome,
            "DO_NOT_DISTURB" => Intent::DoNotDisturb,
            "BACK_IN" => Intent::BackIn,
            "YAAAAY" => Intent::Yaaaay,
            "AMAZON.HelpIntent" => Intent::Help,
            other => Intent::Unrecognized(other.to_owned()),
        }
    }
}

impl Intent {
    pub fn name(&self) -> &str {
        match self {
            Intent::Here => "HERE",
            Intent::BeRightBack => "BE_RIGHT_BACK",
            Intent::GoneHome => "GONE_HOME",
            Intent::DoNotDisturb => "DO_NOT_DISTURB",
            Intent::BackIn => "BACK_IN",
            Intent::Yaaaay => "YAAAAY",
            Intent::Help => "AMAZON.HelpIntent",
            Intent::Unrecognized(name) => name,
        }
    }

    /// Like [`Intent::name`], but bounded: unrecognized names come from the caller.
    pub fn metric_label(&self) -> &str {
        match self {
            Intent::Unrecognized(_) => "unrecognized",
            known => known.name(),
        }
    }
}

/// Filled slot values of an intent. Slots the user did not fill are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots {
    values: HashMap<String, String>,
}

impl Slots {
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Slots {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_names() {
        for name in [
            "HERE",
            "BE_RIGHT_BACK",
            "GONE_HOME",
            "DO_NOT_DISTURB",
            "BACK_IN",
            "YAAAAY",
            "AMAZON.HelpIntent",
        ] {
            let intent = Intent::from(name);
            assert!(!matches!(intent, Intent::Unrecognized(_)), "{name}");
            assert_eq!(intent.name(), name);
        }
    }

    #[test]
    fn test_unrecognized_intent() {
        assert_eq!(
            Intent::from("GetZodiacHoroscopeIntent"),
            Intent::Unrecognized("GetZodiacHoroscopeIntent".to_owned())
        );
        assert_eq!(Intent::from("here"), Intent::Unrecognized("here".to_owned()));
    }

    #[test]
    fn test_metric_label_is_bounded() {
        assert_eq!(Intent::from("BACK_IN").metric_label(), "BACK_IN");
        assert_eq!(Intent::from("AMAZON.HelpIntent").metric_label(), "AMAZON.HelpIntent");
        assert_eq!(Intent::from("GetZodiacHoroscopeIntent").metric_label(), "unrecognized");
        assert_eq!(Intent::from("x".repeat(500).as_str()).metric_label(), "unrecognized");
    }

    #[test]
    fn test_slots() {
        let slots: Slots = [("duration", "PT10M")].into_iter().collect();
        assert_eq!(slots.value("duration"), Some("PT10M"));
        assert_eq!(slots.value("other"), None);
        assert_eq!(Slots::default().value("duration"), None);
    }
}
