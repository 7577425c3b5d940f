use crate::errors::FetchErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    De,
    #[default]
    En,
}

impl Lang {
    /// Parses a `lang` attribute value; anything other than `"de"` falls back
    /// to English.
    pub fn parse(value: &str) -> Self {
        match value {
            "de" => Lang::De,
            _ => Lang::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::De => "de",
            Lang::En => "en",
        }
    }

    pub fn translations(self) -> &'static Translations {
        match self {
            Lang::De => &DE,
            Lang::En => &EN,
        }
    }
}

pub struct Translations {
    pub profile_link_title: &'static str,
    pub collected: &'static str,
    pub sent: &'static str,
    pub error_headline: &'static str,
    pub error_data_not_available: &'static str,
    pub error_data_malformed: &'static str,
    pub error_connection_problems: &'static str,
}

impl Translations {
    pub fn profile_link_title(&self, nickname: &str) -> String {
        self.profile_link_title.replace("{{NICKNAME}}", nickname)
    }

    pub fn error_message(&self, kind: FetchErrorKind) -> &'static str {
        match kind {
            FetchErrorKind::DataNotAvailable => self.error_data_not_available,
            FetchErrorKind::DataMalformed => self.error_data_malformed,
            FetchErrorKind::ConnectionProblems => self.error_connection_problems,
        }
    }
}

static DE: Translations = Translations {
    profile_link_title: "ThankU-Seite von {{NICKNAME}} besuchen",
    collected: "gesammelt",
    sent: "gesendet",
    error_headline: "Datenabruf fehlgeschlagen",
    error_data_not_available: "Daten sind nicht verfügbar",
    error_data_malformed: "Daten sind fehlerhaft",
    error_connection_problems: "Verbindungsprobleme",
};

static EN: Translations = Translations {
    profile_link_title: "Visit {{NICKNAME}}'s ThankU page",
    collected: "collected",
    sent: "sent",
    error_headline: "Fetching data failed",
    error_data_not_available: "Data is not available",
    error_data_malformed: "Data is malformed",
    error_connection_problems: "Connection problems",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_falls_back_to_english() {
        assert_eq!(Lang::parse("de"), Lang::De);
        assert_eq!(Lang::parse("en"), Lang::En);
        assert_eq!(Lang::parse("fr"), Lang::En);
        assert_eq!(Lang::parse(""), Lang::En);
    }

    #[test]
    fn link_title_substitutes_nickname() {
        let en = Lang::En.translations();
        assert_eq!(en.profile_link_title("Ada"), "Visit Ada's ThankU page");
        let de = Lang::De.translations();
        assert_eq!(de.profile_link_title("Ada"), "ThankU-Seite von Ada besuchen");
    }

    #[test]
    fn error_messages_cover_every_kind() {
        let t = Lang::En.translations();
        assert_eq!(
            t.error_message(FetchErrorKind::DataNotAvailable),
            "Data is not available"
        );
        assert_eq!(
            t.error_message(FetchErrorKind::DataMalformed),
            "Data is malformed"
        );
        assert_eq!(
            t.error_message(FetchErrorKind::ConnectionProblems),
            "Connection problems"
        );
    }
}
