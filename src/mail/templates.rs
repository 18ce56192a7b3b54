//! 邮件模板：主题与纯文本正文

use super::MailMessage;
use crate::models::contact::entities::ContactMessage;
use crate::models::students::entities::{EnrollmentStatus, Student};

const SIGNATURE: &str = "Best regards,\nThe EvolvLearn Team";

fn greeting_name<'a>(first_name: &'a str, fallback: &'a str) -> &'a str {
    if first_name.trim().is_empty() {
        fallback
    } else {
        first_name
    }
}

pub fn verification(
    first_name: &str,
    username: &str,
    to: &str,
    link: &str,
    ttl_hours: i64,
) -> MailMessage {
    let body = format!(
        "Hi {name},\n\n\
         Please confirm your email address to activate your EvolvLearn account:\n\n\
         {link}\n\n\
         This link expires in {ttl_hours} hours. If you did not create an account, \
         you can ignore this message.\n\n\
         {SIGNATURE}\n",
        name = greeting_name(first_name, username),
    );
    MailMessage::new(to, "Verify your email - EvolvLearn", body)
}

pub fn welcome(first_name: &str, username: &str, to: &str, contact_email: &str) -> MailMessage {
    let body = format!(
        "Hi {name},\n\n\
         Welcome to EvolvLearn! We're excited to have you join our learning community.\n\n\
         You can now:\n\
         - Browse our courses\n\
         - Apply to become a student\n\
         - Attend our events\n\
         - Connect with our community\n\n\
         If you have any questions, feel free to contact us at {contact_email}\n\n\
         {SIGNATURE}\n",
        name = greeting_name(first_name, username),
    );
    MailMessage::new(to, "Welcome to EvolvLearn!", body).with_reply_to(contact_email)
}

pub fn contact_admin_notification(contact: &ContactMessage, admin_email: &str) -> MailMessage {
    let body = format!(
        "New contact form submission received:\n\n\
         Name: {name}\n\
         Email: {email}\n\
         Message:\n{message}\n\n\
         ---\n\
         Reply to: {email}\n",
        name = contact.name,
        email = contact.email,
        message = contact.message,
    );
    MailMessage::new(
        admin_email,
        format!("New Contact Form Submission from {}", contact.name),
        body,
    )
    .with_reply_to(contact.email.clone())
}

pub fn contact_acknowledgement(contact: &ContactMessage, contact_email: &str) -> MailMessage {
    let body = format!(
        "Hi {name},\n\n\
         Thank you for contacting EvolvLearn!\n\n\
         We have received your message and will get back to you within 24 hours.\n\n\
         Your message:\n{message}\n\n\
         {SIGNATURE}\n",
        name = contact.name,
        message = contact.message,
    );
    MailMessage::new(
        contact.email.clone(),
        "We received your message - EvolvLearn",
        body,
    )
    .with_reply_to(contact_email)
}

pub fn application_received(student: &Student, course_names: &[String]) -> MailMessage {
    let courses = if course_names.is_empty() {
        "-".to_string()
    } else {
        course_names.join(", ")
    };
    let body = format!(
        "Hi {first},\n\n\
         Thank you for applying to EvolvLearn!\n\n\
         We have received your application and our team will review it shortly.\n\
         You will receive an email notification once your application status is updated.\n\n\
         Application Details:\n\
         - Name: {first} {last}\n\
         - Email: {email}\n\
         - Register number: {number}\n\
         - Courses: {courses}\n\n\
         {SIGNATURE}\n",
        first = student.first_name,
        last = student.last_name,
        email = student.email,
        number = student.register_number.as_deref().unwrap_or("-"),
    );
    MailMessage::new(
        student.email.clone(),
        "Application Received - EvolvLearn",
        body,
    )
}

pub fn application_approved(student: &Student, dashboard_link: &str, note: &str) -> MailMessage {
    let mut body = format!(
        "Hi {first},\n\n\
         Great news! Your application to EvolvLearn has been approved!\n\n\
         You can now access:\n\
         - Our GitHub repository\n\
         - Discord community\n\
         - Learning materials\n\n\
         Login to your dashboard to get started: {dashboard_link}\n\n",
        first = student.first_name,
    );
    if !note.is_empty() {
        body.push_str(note);
        body.push_str("\n\n");
    }
    body.push_str(SIGNATURE);
    body.push('\n');
    MailMessage::new(
        student.email.clone(),
        "Congratulations! Your Application is Approved",
        body,
    )
}

pub fn application_status_update(
    student: &Student,
    status: EnrollmentStatus,
    note: &str,
) -> MailMessage {
    let note = if note.is_empty() {
        match status {
            EnrollmentStatus::Rejected => {
                "After careful review we are unable to offer you a place at this time."
            }
            EnrollmentStatus::UnderReview => "Your application is now under review.",
            _ => "Your application status has been updated.",
        }
    } else {
        note
    };
    let body = format!(
        "Hi {first},\n\n\
         Thank you for your interest in EvolvLearn.\n\n\
         {note}\n\n\
         If you have any questions, please don't hesitate to contact us.\n\n\
         {SIGNATURE}\n",
        first = student.first_name,
    );
    MailMessage::new(
        student.email.clone(),
        "Application Status Update - EvolvLearn",
        body,
    )
}

/// 报名状态变为终态时应发送的通知
pub fn for_enrollment_status(
    student: &Student,
    status: EnrollmentStatus,
    course_name: &str,
    dashboard_link: &str,
) -> Option<MailMessage> {
    match status {
        EnrollmentStatus::Approved => Some(application_approved(
            student,
            dashboard_link,
            &format!("Course: {course_name}"),
        )),
        EnrollmentStatus::Rejected => Some(application_status_update(
            student,
            status,
            &format!(
                "After careful review we are unable to offer you a place on {course_name} at this time."
            ),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::{DiplomaLevel, Gender};
    use chrono::{NaiveDate, Utc};

    fn student() -> Student {
        Student {
            id: 1,
            user_id: Some(1),
            email: "tolu@example.com".to_string(),
            phone: "+2348000000000".to_string(),
            first_name: "Tolu".to_string(),
            last_name: "Ade".to_string(),
            gender: Gender::Female,
            birth_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            zip_code: "100001".to_string(),
            country_of_birth: "Nigeria".to_string(),
            nationality: "Nigerian".to_string(),
            register_number: Some("EVOLV-2026-0001".to_string()),
            diploma_level: DiplomaLevel::Bachelor,
            job_status: "employed".to_string(),
            motivation: String::new(),
            future_goals: String::new(),
            proudest_moment: String::new(),
            english_level: 4,
            how_heard: "friend".to_string(),
            referral_person: None,
            has_laptop: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_verification_contains_link() {
        let mail = verification(
            "",
            "ada_l",
            "ada@example.com",
            "http://localhost:3000/verify-email?token=abc",
            24,
        );
        assert_eq!(mail.to, vec!["ada@example.com".to_string()]);
        assert!(mail.body.starts_with("Hi ada_l,"));
        assert!(mail.body.contains("verify-email?token=abc"));
        assert!(mail.body.contains("24 hours"));
    }

    #[test]
    fn test_application_received_lists_courses() {
        let mail = application_received(
            &student(),
            &["Data Analytics".to_string(), "Web Development".to_string()],
        );
        assert!(mail.body.contains("Courses: Data Analytics, Web Development"));
        assert!(mail.body.contains("EVOLV-2026-0001"));
    }

    #[test]
    fn test_approved_links_dashboard() {
        let mail = application_approved(&student(), "https://evolvlearn.org/dashboard", "");
        assert_eq!(mail.subject, "Congratulations! Your Application is Approved");
        assert!(mail.body.contains("https://evolvlearn.org/dashboard"));
    }

    #[test]
    fn test_contact_notification_replies_to_sender() {
        let contact = ContactMessage {
            id: 1,
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            message: "Do you offer evening classes?".to_string(),
            created_at: Utc::now(),
        };
        let admin = contact_admin_notification(&contact, "admin@evolvlearn.org");
        assert_eq!(admin.reply_to.as_deref(), Some("sam@example.com"));
        assert_eq!(admin.subject, "New Contact Form Submission from Sam");

        let ack = contact_acknowledgement(&contact, "admin@evolvlearn.org");
        assert_eq!(ack.to, vec!["sam@example.com".to_string()]);
    }

    #[test]
    fn test_only_final_statuses_notify() {
        let s = student();
        assert!(for_enrollment_status(&s, EnrollmentStatus::Pending, "X", "/d").is_none());
        assert!(for_enrollment_status(&s, EnrollmentStatus::UnderReview, "X", "/d").is_none());
        let rejected = for_enrollment_status(&s, EnrollmentStatus::Rejected, "X", "/d").unwrap();
        assert_eq!(rejected.subject, "Application Status Update - EvolvLearn");
    }
}
