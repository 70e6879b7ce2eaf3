//! Terminal renderings of the application's views

use async_trait::async_trait;
use carelink_core::routes::{ViewId, ViewLoader};
use carelink_core::Error;

/// What the terminal shows for a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSummary {
    pub id: String,
    pub title: &'static str,
    pub description: &'static str,
}

const CATALOG: &[(&str, &str, &str)] = &[
    ("LandingPage", "Home", "Overview of reminders, finders and the assistant"),
    ("Login", "Log in", "Sign in with `carelink login`"),
    ("Register", "Register", "Create an account with `carelink register`"),
    ("UserDashboard", "Dashboard", "Today's medicines and health tips"),
    ("CareTakerDashboard", "Caretaker dashboard", "People you look after and their alerts"),
    ("TertiaryUserDashboard", "Family dashboard", "Shared updates from caretakers"),
    ("Chatbot", "Health assistant", "Ask general health questions"),
    ("MedicineReminders", "Medicine reminders", "Scheduled doses"),
    ("DownloadApp", "Get the app", "Mobile app downloads"),
    ("DoctorFinder", "Doctor finder", "Doctors near you"),
    ("YogaVideos", "Yoga videos", "Guided sessions"),
    ("PharmacyFinder", "Pharmacy finder", "Pharmacies near you"),
    ("MissedMedicineAlerts", "Missed medicines", "Doses that were not confirmed"),
    ("LocationFinder", "Location finder", "Share or look up a location"),
    ("AddMedicine", "Add medicine", "Create a reminder"),
    ("DeleteMedicine", "Delete medicine", "Remove a reminder"),
    ("ShareHealthTips", "Share health tips", "Post a tip for others"),
    ("ShareYogaVideos", "Share yoga videos", "Post a video for others"),
    ("VoiceReminders", "Voice reminders", "Spoken reminders"),
    ("DailyHealth", "Daily health", "Log how you feel today"),
    ("YogaAnimation", "Yoga animation", "Animated poses"),
    ("AboutView", "About", "About carelink"),
    ("UserProfile", "Profile", "Your account details"),
    ("HospitalFinder", "Hospital finder", "Hospitals near you"),
    ("PersonalChatbot", "Personal assistant", "Assistant that knows your history"),
];

/// Resolves view ids against the built-in catalog
#[derive(Debug, Default)]
pub struct CatalogLoader;

#[async_trait]
impl ViewLoader for CatalogLoader {
    type View = ViewSummary;

    async fn load(&self, view: &ViewId) -> carelink_core::Result<ViewSummary> {
        CATALOG
            .iter()
            .find(|(id, _, _)| *id == view.as_str())
            .map(|&(id, title, description)| ViewSummary {
                id: id.to_string(),
                title,
                description,
            })
            .ok_or_else(|| Error::View(format!("no view named '{}'", view)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carelink_core::routes::default_routes;

    #[tokio::test]
    async fn test_every_default_route_has_a_view() {
        let loader = CatalogLoader;
        for route in default_routes() {
            let view = loader.load(&route.view).await.unwrap();
            assert_eq!(view.id, route.view.as_str());
        }
    }

    #[tokio::test]
    async fn test_unknown_view_is_an_error() {
        let err = CatalogLoader.load(&ViewId::new("Nope")).await.unwrap_err();
        assert!(matches!(err, Error::View(_)));
    }
}
