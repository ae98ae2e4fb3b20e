use serde::Deserialize;
use validator::Validate;

use super::validation::{
    check_password_match, collect_errors, require, sanitize_mobile, validate_mobile, FieldErrors,
};
use crate::api::auth::{Credentials, ProfileUpdate};
use crate::api::users::{NewUser, UserUpdate};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn into_credentials(self) -> Result<Credentials, FieldErrors> {
        let mut errors = self.validate().err().map(|e| collect_errors(&e)).unwrap_or_default();
        require(&mut errors, "email", &self.email, "Email");
        require(&mut errors, "password", &self.password, "Password");
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Credentials {
            email: self.email.trim().to_string(),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserForm {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_mobile"))]
    pub mobile: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_address: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl CreateUserForm {
    pub fn into_new_user(mut self) -> Result<NewUser, FieldErrors> {
        self.mobile = sanitize_mobile(&self.mobile);

        let mut errors = self.validate().err().map(|e| collect_errors(&e)).unwrap_or_default();
        require(&mut errors, "first_name", &self.first_name, "First name");
        require(&mut errors, "email", &self.email, "Email");
        require(&mut errors, "mobile", &self.mobile, "Mobile number");
        require(&mut errors, "password", &self.password, "Password");
        check_password_match(&mut errors, &self.password, &self.confirm_password);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewUser {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            mobile: self.mobile,
            company_name: non_empty(self.company_name),
            company_address: non_empty(self.company_address),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditUserForm {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_mobile"))]
    pub mobile: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_address: Option<String>,
}

impl EditUserForm {
    pub fn into_update(mut self) -> Result<UserUpdate, FieldErrors> {
        self.mobile = sanitize_mobile(&self.mobile);

        let mut errors = self.validate().err().map(|e| collect_errors(&e)).unwrap_or_default();
        require(&mut errors, "first_name", &self.first_name, "First name");
        require(&mut errors, "email", &self.email, "Email");
        require(&mut errors, "mobile", &self.mobile, "Mobile number");
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(UserUpdate {
            first_name: Some(self.first_name.trim().to_string()),
            last_name: Some(self.last_name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            mobile: Some(self.mobile),
            company_name: non_empty(self.company_name),
            company_address: non_empty(self.company_address),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileForm {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(custom(function = "validate_mobile"))]
    pub mobile: String,
    #[serde(default)]
    pub company_name: Option<String>,
}

impl ProfileForm {
    pub fn into_update(mut self) -> Result<ProfileUpdate, FieldErrors> {
        self.mobile = sanitize_mobile(&self.mobile);

        let mut errors = self.validate().err().map(|e| collect_errors(&e)).unwrap_or_default();
        require(&mut errors, "first_name", &self.first_name, "First name");
        require(&mut errors, "mobile", &self.mobile, "Mobile number");
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ProfileUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            mobile: self.mobile,
            company_name: non_empty(self.company_name),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_form() -> CreateUserForm {
        CreateUserForm {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            mobile: "98-76 543a210X".to_string(),
            company_name: Some("  ".to_string()),
            company_address: None,
            password: "Secret#123".to_string(),
            confirm_password: "Secret#123".to_string(),
        }
    }

    #[test]
    fn test_create_user_sanitizes_mobile() {
        let user = create_form().into_new_user().unwrap();
        assert_eq!(user.mobile, "9876543210");
        assert_eq!(user.company_name, None);
    }

    #[test]
    fn test_create_user_collects_field_errors() {
        let form = CreateUserForm {
            first_name: " ".to_string(),
            email: "not-an-email".to_string(),
            mobile: "12345".to_string(),
            confirm_password: "different".to_string(),
            ..create_form()
        };
        let errors = form.into_new_user().unwrap_err();
        assert_eq!(errors["first_name"], "First name is required");
        assert_eq!(errors["email"], "Enter a valid email address");
        assert_eq!(errors["mobile"], "Mobile number must be exactly 10 digits");
        assert_eq!(errors["confirm_password"], "Passwords do not match");
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn test_empty_email_reports_required() {
        let form = CreateUserForm {
            email: String::new(),
            ..create_form()
        };
        let errors = form.into_new_user().unwrap_err();
        assert_eq!(errors["email"], "Email is required");
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            email: "admin@example.com".to_string(),
            password: String::new(),
        };
        let errors = form.into_credentials().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["password"], "Password is required");
    }

    #[test]
    fn test_edit_user_builds_update() {
        let form = EditUserForm {
            first_name: "Asha".to_string(),
            last_name: String::new(),
            email: "asha@example.com".to_string(),
            mobile: "(987) 654-3210".to_string(),
            company_name: Some("Acme".to_string()),
            company_address: None,
        };
        let update = form.into_update().unwrap();
        assert_eq!(update.mobile.as_deref(), Some("9876543210"));
        assert_eq!(update.company_name.as_deref(), Some("Acme"));
    }
}
