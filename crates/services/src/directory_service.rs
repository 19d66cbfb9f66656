//! Physiotherapist browsing for the directory screen.

use std::sync::Arc;

use backend::TherapistGateway;
use posture_core::model::Physiotherapist;

use crate::error::DirectoryError;

/// Lists and filters the physiotherapist directory.
///
/// The directory is small enough to filter client side; `matching` fetches
/// the full list and narrows it locally.
#[derive(Clone)]
pub struct TherapistDirectory {
    therapists: Arc<dyn TherapistGateway>,
}

impl TherapistDirectory {
    #[must_use]
    pub fn new(therapists: Arc<dyn TherapistGateway>) -> Self {
        Self { therapists }
    }

    /// The full directory, in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Api`] when the listing fails.
    pub async fn list(&self) -> Result<Vec<Physiotherapist>, DirectoryError> {
        Ok(self.therapists.list().await?)
    }

    /// Directory entries whose name, specialty, or city contains `query`,
    /// case-insensitively. A blank query returns the full directory.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Api`] when the listing fails.
    pub async fn matching(&self, query: &str) -> Result<Vec<Physiotherapist>, DirectoryError> {
        let all = self.list().await?;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(all);
        }
        Ok(all
            .into_iter()
            .filter(|t| {
                t.full_name().to_lowercase().contains(&needle)
                    || t.specialty().to_lowercase().contains(&needle)
                    || t.city().to_lowercase().contains(&needle)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::InMemoryBackend;
    use posture_core::model::TherapistId;

    fn therapist(id: u64, name: &str, specialty: &str, city: &str) -> Physiotherapist {
        Physiotherapist::new(TherapistId::new(id), name, specialty, city, None)
    }

    fn seeded() -> InMemoryBackend {
        let store = InMemoryBackend::new();
        store
            .seed_therapists(vec![
                therapist(1, "Sara Mohammadi", "Spinal rehabilitation", "Tehran"),
                therapist(2, "Reza Karimi", "Sports physiotherapy", "Isfahan"),
                therapist(3, "Neda Alavi", "Posture correction", "Tehran"),
            ])
            .unwrap();
        store
    }

    #[tokio::test]
    async fn blank_query_returns_the_full_directory() {
        let directory = TherapistDirectory::new(Arc::new(seeded()));
        assert_eq!(directory.matching("   ").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn query_matches_name_specialty_and_city() {
        let directory = TherapistDirectory::new(Arc::new(seeded()));

        let by_city = directory.matching("tehran").await.unwrap();
        assert_eq!(by_city.len(), 2);

        let by_specialty = directory.matching("POSTURE").await.unwrap();
        assert_eq!(by_specialty.len(), 1);
        assert_eq!(by_specialty[0].full_name(), "Neda Alavi");

        let by_name = directory.matching("reza").await.unwrap();
        assert_eq!(by_name.len(), 1);

        assert!(directory.matching("acupuncture").await.unwrap().is_empty());
    }
}
