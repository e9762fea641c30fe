//! Profile editing: account fields and profile picture

use super::Dashboard;
use crate::client::{Backend, ProfileUpdate, UploadFile};
use crate::outcome::Outcome;
use crate::ui::view::Loading;
use crate::ui::{FormId, NotificationKind, View};
use crate::util::{validate_file, validate_password, IMAGE_EXTENSIONS, PASSWORD_TOO_SHORT};

/// Raw profile form input; an empty password keeps the current one
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub password: String,
}

impl<B, V> Dashboard<B, V>
where
    B: Backend + 'static,
    V: View + 'static,
{
    /// Fetch the account and fill the profile fields and picture
    pub async fn load_user_info(&self) {
        self.refresh_user_info(None).await;
    }

    pub(super) async fn refresh_user_info(&self, epoch: Option<u64>) {
        let response = match self.backend.user_info().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load user info");
                return;
            }
        };

        let user = match response.user {
            Some(user) if response.success => user,
            _ => {
                tracing::debug!(message = ?response.message, "user info unavailable");
                return;
            }
        };
        if !self.is_current(epoch).await {
            tracing::debug!("discarding user info from a previous navigation");
            return;
        }

        if user.has_custom_picture() {
            self.view
                .set_profile_picture(&self.backend.profile_pic_url(&user.profile_pic));
        }
        self.view.set_profile_fields(&user.name, &user.email);
    }

    /// Replace the profile picture
    pub async fn upload_profile_picture(&self, file: UploadFile) -> Outcome {
        if !validate_file(&file.name, IMAGE_EXTENSIONS) {
            self.notify(
                NotificationKind::Error,
                "Invalid image type. Please use PNG, JPG, JPEG, or GIF.",
            );
            return Outcome::Rejected;
        }

        match self.backend.upload_profile_pic(file).await {
            Ok(response) if response.success => {
                self.notify(NotificationKind::Success, &response.message);
                if let Some(picture) = response.profile_pic {
                    self.view
                        .set_profile_picture(&self.backend.profile_pic_url(&picture));
                }
                Outcome::Succeeded
            }
            Ok(response) => {
                self.notify(NotificationKind::Error, &response.message);
                Outcome::Declined
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile picture upload failed");
                self.notify(NotificationKind::Error, "Error uploading profile picture");
                Outcome::Failed
            }
        }
    }

    /// Submit the profile form
    pub async fn update_profile(&self, form: &ProfileForm) -> Outcome {
        if !form.password.is_empty() && !validate_password(&form.password) {
            self.notify(NotificationKind::Error, PASSWORD_TOO_SHORT);
            return Outcome::Rejected;
        }

        let update = ProfileUpdate {
            name: form.name.clone(),
            password: form.password.clone(),
        };

        let loading = Loading::start(&*self.view, FormId::Profile);
        let outcome = match self.backend.update_profile(&update).await {
            Ok(response) if response.success => {
                self.notify(NotificationKind::Success, &response.message);
                self.view.clear_password_field();
                Outcome::Succeeded
            }
            Ok(response) => {
                self.notify(NotificationKind::Error, &response.message);
                Outcome::Declined
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile update failed");
                self.notify(NotificationKind::Error, "Error updating profile");
                Outcome::Failed
            }
        };
        drop(loading);

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::dashboard;
    use super::*;
    use crate::client::{ProfilePicResponse, UserInfoResponse, UserProfile};
    use crate::testing::*;
    use crate::ui::Section;

    #[tokio::test]
    async fn test_default_avatar_is_not_displayed() {
        let (dashboard, _, view) = dashboard();

        dashboard.load_user_info().await;

        assert_eq!(
            view.events(),
            vec![Event::ProfileFields("Ada".into(), "ada@example.com".into())]
        );
    }

    #[tokio::test]
    async fn test_custom_picture_is_displayed() {
        let (dashboard, backend, view) = dashboard();
        MockBackend::set(
            &backend.user_info,
            Reply::Ok(UserInfoResponse {
                success: true,
                user: Some(UserProfile {
                    name: "Ada".to_string(),
                    email: "ada@example.com".to_string(),
                    profile_pic: "1_me.png".to_string(),
                }),
                message: None,
            }),
        );

        dashboard.show_section(Section::Profile).await;

        assert!(view.events().contains(&Event::ProfilePicture(
            "http://test/static/profile_pics/1_me.png?1".to_string()
        )));
    }

    #[tokio::test]
    async fn test_logged_out_user_info_changes_nothing() {
        let (dashboard, backend, view) = dashboard();
        MockBackend::set(
            &backend.user_info,
            Reply::Ok(UserInfoResponse {
                success: false,
                user: None,
                message: Some("Not logged in".to_string()),
            }),
        );

        dashboard.load_user_info().await;
        MockBackend::set(&backend.user_info, Reply::Transport);
        dashboard.load_user_info().await;

        assert!(view.events().is_empty());
    }

    #[tokio::test]
    async fn test_picture_type_is_validated() {
        let (dashboard, backend, view) = dashboard();

        let outcome = dashboard
            .upload_profile_picture(UploadFile::new("me.bmp", vec![0u8; 4]))
            .await;

        assert_eq!(outcome, Outcome::Rejected);
        assert!(backend.calls().is_empty());
        assert_eq!(
            view.notifications(),
            vec![(
                NotificationKind::Error,
                "Invalid image type. Please use PNG, JPG, JPEG, or GIF.".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_picture_upload_updates_display() {
        let (dashboard, backend, view) = dashboard();

        let outcome = dashboard
            .upload_profile_picture(UploadFile::new("Me.JPG", vec![0u8; 4]))
            .await;

        assert_eq!(outcome, Outcome::Succeeded);
        assert_eq!(backend.calls(), vec!["profile_pic:Me.JPG"]);
        assert_eq!(
            view.events(),
            vec![
                Event::Notify(NotificationKind::Success, "Profile picture updated".to_string()),
                Event::ProfilePicture("http://test/static/profile_pics/1_me.png?1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_picture_upload_failures() {
        let (dashboard, backend, view) = dashboard();
        MockBackend::set(
            &backend.profile_pic,
            Reply::Ok(ProfilePicResponse {
                success: false,
                profile_pic: None,
                message: "User not found".to_string(),
            }),
        );
        assert_eq!(
            dashboard
                .upload_profile_picture(UploadFile::new("me.png", vec![1u8]))
                .await,
            Outcome::Declined
        );

        MockBackend::set(&backend.profile_pic, Reply::Transport);
        assert_eq!(
            dashboard
                .upload_profile_picture(UploadFile::new("me.png", vec![1u8]))
                .await,
            Outcome::Failed
        );

        assert_eq!(
            view.notifications(),
            vec![
                (NotificationKind::Error, "User not found".to_string()),
                (
                    NotificationKind::Error,
                    "Error uploading profile picture".to_string()
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_profile_clears_password() {
        let (dashboard, backend, view) = dashboard();

        let outcome = dashboard
            .update_profile(&ProfileForm {
                name: "Ada L.".to_string(),
                password: "newsecret".to_string(),
            })
            .await;

        assert_eq!(outcome, Outcome::Succeeded);
        assert_eq!(backend.calls(), vec!["update:Ada L."]);
        assert_eq!(
            view.events(),
            vec![
                Event::Loading(FormId::Profile, true),
                Event::Notify(NotificationKind::Success, "Profile updated".to_string()),
                Event::ClearPassword,
                Event::Loading(FormId::Profile, false),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_profile_password_rules() {
        let (dashboard, backend, view) = dashboard();

        let short = dashboard
            .update_profile(&ProfileForm {
                name: "Ada".to_string(),
                password: "abc".to_string(),
            })
            .await;
        assert_eq!(short, Outcome::Rejected);
        assert!(backend.calls().is_empty());

        // An empty password keeps the current one and is not validated
        let keep = dashboard
            .update_profile(&ProfileForm {
                name: "Ada".to_string(),
                password: String::new(),
            })
            .await;
        assert_eq!(keep, Outcome::Succeeded);
        assert_eq!(view.notifications()[0].1, PASSWORD_TOO_SHORT);
    }

    #[tokio::test]
    async fn test_update_profile_transport_failure() {
        let (dashboard, backend, view) = dashboard();
        MockBackend::set(&backend.update, Reply::Transport);

        let outcome = dashboard
            .update_profile(&ProfileForm {
                name: "Ada".to_string(),
                password: String::new(),
            })
            .await;

        assert_eq!(outcome, Outcome::Failed);
        assert!(!view.events().contains(&Event::ClearPassword));
        assert_eq!(view.events().last(), Some(&Event::Loading(FormId::Profile, false)));
    }

    #[tokio::test]
    async fn test_user_info_dropped_after_navigating_away() {
        let (dashboard, backend, view) = dashboard();
        let gate = backend.hold("user_info");

        let profile = dashboard.show_section(Section::Profile);
        let navigate = async {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            dashboard.show_section(Section::Upload).await;
            gate.notify_one();
        };
        tokio::join!(profile, navigate);

        assert_eq!(backend.count("user_info"), 1);
        assert!(!view
            .events()
            .iter()
            .any(|e| matches!(e, Event::ProfileFields(..))));
    }
}
