//! Profile display formatting

use crate::models::Profile;
use crate::services::ProfileSummary;

/// Format the full profile for display
pub fn format_profile_details(profile: &Profile) -> String {
    let personal = &profile.personal_info;
    let medical = &profile.medical_info;
    let contact = &profile.contact_info;
    let prefs = &profile.preferences;

    let mut output = String::new();

    output.push_str("Personal Information\n");
    output.push_str("====================\n");
    output.push_str(&format!("Name:        {}\n", or_not_set(&personal.name)));
    output.push_str(&format!(
        "Age:         {}\n",
        personal
            .age
            .map_or_else(|| "Not set".to_string(), |a| a.to_string())
    ));
    output.push_str(&format!("Gender:      {}\n", or_not_set(&personal.gender)));
    output.push_str(&format!("Weight:      {}\n", personal.weight));
    output.push_str(&format!("Height:      {}\n", personal.height));
    output.push_str(&format!("Blood type:  {}\n", or_not_set(&personal.blood_type)));
    output.push('\n');

    output.push_str("Medical Information\n");
    output.push_str("===================\n");
    output.push_str(&format!("Conditions:  {}\n", or_none(&medical.conditions)));
    output.push_str(&format!("Allergies:   {}\n", or_none(&medical.allergies)));
    output.push_str(&format!("Doctor:      {}\n", or_not_set(&medical.doctor_name)));
    if !medical.doctor_email.is_empty() {
        output.push_str(&format!("Doctor email: {}\n", medical.doctor_email));
    }
    output.push_str(&format!("Diagnosis:   {}\n", or_not_set(&medical.diagnosis)));
    output.push('\n');

    output.push_str("Emergency Contact\n");
    output.push_str("=================\n");
    output.push_str(&format!(
        "Name:        {}\n",
        or_not_set(&contact.emergency_contact_name)
    ));
    output.push_str(&format!(
        "Phone:       {}\n",
        or_not_set(&contact.emergency_contact_phone)
    ));
    output.push('\n');

    output.push_str("Preferences\n");
    output.push_str("===========\n");
    output.push_str(&format!("Language:    {}\n", prefs.language));
    output.push_str(&format!("Units:       {:?}\n", prefs.unit_system));
    output.push_str(&format!(
        "Privacy:     {}\n",
        if prefs.privacy_mode { "On" } else { "Off" }
    ));

    output
}

/// Format the short profile summary
pub fn format_profile_summary(summary: &ProfileSummary) -> String {
    format!(
        "Name: {}\nAge: {}\nWeight: {}\nHeight: {}\nConditions: {}\nDoctor: {}\n",
        summary.name, summary.age, summary.weight, summary.height, summary.conditions, summary.doctor
    )
}

fn or_not_set(s: &str) -> &str {
    if s.trim().is_empty() {
        "Not set"
    } else {
        s
    }
}

fn or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}
