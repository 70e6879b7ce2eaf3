//! The application's route table

use super::table::Route;

/// Path of the login view, the default redirect target of the guard
pub const LOGIN_PATH: &str = "/userlogin";

/// Every route the application serves, in declaration order
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::new("/", "home", "LandingPage"),
        Route::new(LOGIN_PATH, "userlogin", "Login"),
        Route::new("/register", "register", "Register"),
        Route::new("/userdashboard", "userdashboard", "UserDashboard"),
        Route::new("/caretaker", "caretaker", "CareTakerDashboard"),
        Route::new("/tertiaryuser", "tertiaryuser", "TertiaryUserDashboard"),
        Route::new("/chatbot", "chatbot", "Chatbot"),
        Route::new("/medicinereminders", "medicinereminders", "MedicineReminders"),
        Route::new("/download-app", "downloadapp", "DownloadApp"),
        Route::new("/doctor-finder", "doctorfinder", "DoctorFinder"),
        Route::new("/yoga-videos", "videos", "YogaVideos"),
        Route::new("/pharmacy-finder", "pharmacy-finder", "PharmacyFinder"),
        Route::new("/missedmedicinealert", "missedmedicinealert", "MissedMedicineAlerts"),
        Route::new("/locationfinder", "locationfinder", "LocationFinder"),
        Route::new("/addmedicinealert", "addmedicinealert", "AddMedicine"),
        Route::new("/deletemedicinealert", "deletemedicinealert", "DeleteMedicine"),
        Route::new("/sharehealthtips", "sharehealthtips", "ShareHealthTips"),
        Route::new("/share-yoga-videos", "share-yoga-videos", "ShareYogaVideos"),
        Route::new("/voice-reminders", "voice-remainders", "VoiceReminders"),
        Route::new("/daily-health", "daily-health", "DailyHealth"),
        Route::new("/animation", "animation", "YogaAnimation"),
        Route::new("/about", "about", "AboutView"),
        Route::new("/profile", "UserProfile", "UserProfile").requires_auth(),
        Route::new("/hospital-finder", "HospitalFinder", "HospitalFinder"),
        Route::new("/personal-chatbot", "PersonalChatbot", "PersonalChatbot").requires_auth(),
    ]
}
