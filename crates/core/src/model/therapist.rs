use crate::model::ids::TherapistId;

/// A physiotherapist listed in the in-app directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Physiotherapist {
    id: TherapistId,
    full_name: String,
    specialty: String,
    city: String,
    email: Option<String>,
}

impl Physiotherapist {
    #[must_use]
    pub fn new(
        id: TherapistId,
        full_name: impl Into<String>,
        specialty: impl Into<String>,
        city: impl Into<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            specialty: specialty.into(),
            city: city.into(),
            email,
        }
    }

    #[must_use]
    pub fn id(&self) -> TherapistId {
        self.id
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Contact address, when the therapist chose to publish one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_expose_fields() {
        let therapist = Physiotherapist::new(
            TherapistId::new(11),
            "Dana Reyes",
            "Spine rehabilitation",
            "Rotterdam",
            Some("dana@clinic.example".to_string()),
        );
        assert_eq!(therapist.id(), TherapistId::new(11));
        assert_eq!(therapist.full_name(), "Dana Reyes");
        assert_eq!(therapist.specialty(), "Spine rehabilitation");
        assert_eq!(therapist.city(), "Rotterdam");
        assert_eq!(therapist.email(), Some("dana@clinic.example"));
    }
}
