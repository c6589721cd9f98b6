use std::sync::OnceLock;
use regex::Regex;
use crate::models::{NewStudent, OfficerForm};

fn mobile_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[6-9]\d{9}$").expect("mobile pattern"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").expect("email pattern")
    })
}

/// Ten digits starting with 6-9.
pub fn is_valid_mobile(mobile: &str) -> bool {
    mobile_re().is_match(mobile.trim())
}

pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email.trim())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err("Please enter both email and password".to_string());
    }
    Ok(())
}

pub fn validate_officer(form: &OfficerForm, is_edit: bool) -> Result<(), String> {
    if form.name.trim().is_empty() || form.email.trim().is_empty() {
        return Err("Name and email are required".to_string());
    }
    if !is_valid_mobile(&form.mobile) {
        return Err("Please enter a valid 10-digit Indian mobile number".to_string());
    }
    if !is_valid_email(&form.email) {
        return Err("Please enter a valid email address".to_string());
    }
    if !is_edit && form.password.trim().is_empty() {
        return Err("Password is required for a new officer".to_string());
    }
    Ok(())
}

pub fn validate_student(student: &NewStudent) -> Result<(), String> {
    if student.name.trim().is_empty()
        || student.enrollment_number.trim().is_empty()
        || student.dob.trim().is_empty()
    {
        return Err("Name, enrollment number and date of birth are required".to_string());
    }
    if !student.mobile.trim().is_empty() && !is_valid_mobile(&student.mobile) {
        return Err("Please enter a valid 10-digit Indian mobile number".to_string());
    }
    if !student.email.trim().is_empty() && !is_valid_email(&student.email) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indian_mobile_numbers() {
        assert!(is_valid_mobile("6280486823"));
        assert!(is_valid_mobile("9876543210"));
        assert!(!is_valid_mobile("5876543210"));
        assert!(!is_valid_mobile("987654321"));
        assert!(!is_valid_mobile("98765432101"));
        assert!(!is_valid_mobile("98765x3210"));
    }

    #[test]
    fn officer_form_rules() {
        let mut form = OfficerForm {
            name: "Meera Iyer".into(),
            mobile: "9876543210".into(),
            email: "meera@college.edu".into(),
            password: String::new(),
            designation: "Warden".into(),
            department: "Hostel".into(),
        };
        assert!(validate_officer(&form, true).is_ok());
        assert!(validate_officer(&form, false).is_err());

        form.password = "Initial#1".into();
        assert!(validate_officer(&form, false).is_ok());

        form.mobile = "12345".into();
        assert_eq!(
            validate_officer(&form, false).unwrap_err(),
            "Please enter a valid 10-digit Indian mobile number"
        );
    }

    #[test]
    fn student_optional_fields_checked_only_when_present() {
        let mut student = NewStudent {
            name: "Abhay Vishwakarma".into(),
            enrollment_number: "EN123456".into(),
            dob: "24/04/2004".into(),
            ..NewStudent::default()
        };
        assert!(validate_student(&student).is_ok());

        student.mobile = "000".into();
        assert!(validate_student(&student).is_err());

        student.mobile = "6280486823".into();
        student.dob.clear();
        assert!(validate_student(&student).is_err());
    }

    #[test]
    fn login_needs_both_fields() {
        assert!(validate_login("admin@college.edu", "secret").is_ok());
        assert!(validate_login(" ", "secret").is_err());
        assert!(validate_login("admin@college.edu", "").is_err());
    }
}
