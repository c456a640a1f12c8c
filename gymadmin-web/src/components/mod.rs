pub(crate) mod activity_form;
pub(crate) mod layout;
pub(crate) mod loading;
