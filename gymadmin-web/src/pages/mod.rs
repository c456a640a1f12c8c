mod activities;
mod dashboard;
mod login;
mod my_activities;
mod new_activity;
mod users;

pub use activities::ActivitiesPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use my_activities::MyActivitiesPage;
pub use new_activity::NewActivityPage;
pub use users::UsersPage;
