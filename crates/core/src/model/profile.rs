use crate::model::ids::UserId;

//
// ─── USER ─────────────────────────────────────────────────────────────────────
//

/// The signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: String,
    display_name: String,
}

impl User {
    #[must_use]
    pub fn new(id: UserId, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: display_name.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Name shown in the shell's greeting and account screens.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

//
// ─── PROFILE ──────────────────────────────────────────────────────────────────
//

/// Body measurements attached to an account.
///
/// Every measurement is optional; users fill the profile in at their own
/// pace and derived figures simply stay unavailable until they do.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    user_id: UserId,
    full_name: String,
    birth_year: Option<i32>,
    height_cm: Option<u32>,
    weight_kg: Option<f32>,
}

impl UserProfile {
    #[must_use]
    pub fn new(
        user_id: UserId,
        full_name: impl Into<String>,
        birth_year: Option<i32>,
        height_cm: Option<u32>,
        weight_kg: Option<f32>,
    ) -> Self {
        Self {
            user_id,
            full_name: full_name.into(),
            birth_year,
            height_cm,
            weight_kg,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn birth_year(&self) -> Option<i32> {
        self.birth_year
    }

    #[must_use]
    pub fn height_cm(&self) -> Option<u32> {
        self.height_cm
    }

    #[must_use]
    pub fn weight_kg(&self) -> Option<f32> {
        self.weight_kg
    }

    /// Body mass index from the recorded measurements.
    ///
    /// Available only when both height and weight are present and the
    /// height is non-zero.
    #[must_use]
    pub fn bmi(&self) -> Option<f32> {
        let height_cm = self.height_cm.filter(|cm| *cm > 0)?;
        let weight_kg = self.weight_kg?;
        let height_m = height_cm as f32 / 100.0;
        Some(weight_kg / (height_m * height_m))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_uses_height_and_weight() {
        let profile = UserProfile::new(UserId::new(1), "Avery Quinn", Some(1992), Some(180), Some(81.0));
        let bmi = profile.bmi().unwrap();
        assert!((bmi - 25.0).abs() < 0.01);
    }

    #[test]
    fn bmi_is_unavailable_without_measurements() {
        let no_weight = UserProfile::new(UserId::new(1), "Avery Quinn", None, Some(180), None);
        assert!(no_weight.bmi().is_none());

        let zero_height = UserProfile::new(UserId::new(1), "Avery Quinn", None, Some(0), Some(70.0));
        assert!(zero_height.bmi().is_none());
    }

    #[test]
    fn user_creation_works() {
        let user = User::new(UserId::new(42), "avery@example.com", "Avery");
        assert_eq!(user.id(), UserId::new(42));
        assert_eq!(user.email(), "avery@example.com");
        assert_eq!(user.display_name(), "Avery");
    }
}
