use frontdesk_core::FieldPolicy;

/// One offered appointment slot in the scheduling script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppointmentSlot {
    pub doctor: &'static str,
    pub time: &'static str,
}

/// The slots the assistant is allowed to offer. Scheduling against a live
/// calendar is the external runtime's problem; the script works from this
/// fixed card.
pub const APPOINTMENT_SLOTS: [AppointmentSlot; 3] = [
    AppointmentSlot { doctor: "Dr. Jane Smith", time: "Monday at 9 AM" },
    AppointmentSlot { doctor: "Dr. Mark Patel", time: "Tuesday at 1 PM" },
    AppointmentSlot { doctor: "Dr. Emily Zhang", time: "Wednesday at 3 PM" },
];

/// Renders the operating instructions handed to the external conversational
/// runtime. The summary block is generated from the deployment's field
/// policy and the closing line from the configured sentinel, so the script,
/// the detector, and the dispatcher stay in agreement about the contract.
pub fn intake_instructions(policy: &FieldPolicy, closing_sentinel: &str) -> String {
    let mut script = String::new();
    script.push_str("You are a friendly and helpful voice-based medical intake assistant.\n");
    script.push_str("Walk the caller through the following steps:\n");
    script.push_str("1. Ask for the patient's full name and date of birth.\n");
    script.push_str("2. Collect insurance information: payer name and payer ID.\n");
    script.push_str("3. Ask if they have a referral, and to which physician.\n");
    script.push_str("4. Ask for their chief complaint or reason for the visit.\n");
    script.push_str("5. Ask for their full address (street, city, state, and ZIP code).\n");
    script.push_str("    - After collecting it, check it with the validate_address tool.\n");
    script.push_str("    - If it is incomplete or invalid, politely ask the caller to repeat it.\n");
    script.push_str("6. Collect contact information: phone number (required), and email (optional).\n");
    script.push_str("7. Offer the following appointment options:\n");
    for slot in APPOINTMENT_SLOTS {
        script.push_str(&format!("    - {}, {}\n", slot.doctor, slot.time));
    }
    script.push_str("8. Let the caller choose one, then repeat the full intake details for confirmation.\n");
    script.push_str("9. End the call politely.\n");
    script.push_str("At the end, summarize the intake in the following JSON format in a message:\n");
    script.push_str(&summary_format(policy));
    script.push_str(&format!("Then say: {closing_sentinel}.\n"));
    script
}

fn summary_format(policy: &FieldPolicy) -> String {
    let mut block = String::from("{\n");
    let required = policy.required();
    for (index, field) in required.iter().enumerate() {
        let trailing = if index + 1 == required.len() { "" } else { "," };
        block.push_str(&format!("  \"{field}\": \"<{field}>\"{trailing}\n"));
    }
    block.push_str("}\n");
    block
}

#[cfg(test)]
mod tests {
    use frontdesk_core::{FieldPolicy, DEFAULT_SENTINELS};

    use super::{intake_instructions, APPOINTMENT_SLOTS};

    #[test]
    fn script_offers_every_appointment_slot() {
        let script = intake_instructions(&FieldPolicy::appointment(), DEFAULT_SENTINELS[0]);

        for slot in APPOINTMENT_SLOTS {
            assert!(script.contains(slot.doctor), "script should offer {}", slot.doctor);
            assert!(script.contains(slot.time), "script should offer {}", slot.time);
        }
    }

    #[test]
    fn summary_block_lists_the_required_fields() {
        let script = intake_instructions(&FieldPolicy::appointment(), DEFAULT_SENTINELS[0]);

        assert!(script.contains("\"patient_name\": \"<patient_name>\","));
        assert!(script.contains("\"doctor_name\": \"<doctor_name>\","));
        assert!(script.contains("\"appointment_time\": \"<appointment_time>\"\n"));
    }

    #[test]
    fn closing_line_uses_the_configured_sentinel() {
        let script = intake_instructions(
            &FieldPolicy::appointment(),
            "Here is the summary of your request",
        );

        assert!(script.ends_with("Then say: Here is the summary of your request.\n"));
    }

    #[test]
    fn script_points_the_model_at_the_address_tool() {
        let script = intake_instructions(&FieldPolicy::appointment(), DEFAULT_SENTINELS[0]);

        assert!(script.contains("validate_address"));
    }
}
