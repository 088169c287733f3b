//! Predefined audit questions offered for every claim.

/// Build the six audit questions for a claim, in display order.
pub fn audit_questions(claim_no: &str) -> Vec<String> {
    vec![
        format!(
            "For claim {claim_no}, was a payment issued to the vendor 3-5 calendar days after the invoice was received? If yes, please provide details."
        ),
        format!(
            "For claim {claim_no}, was a payment issued to the vendor 8-13 calendar days after the invoice was received? If yes, please provide details."
        ),
        format!(
            "For claim {claim_no}, was a payment issued to the vendor 14-29 calendar days after the invoice was received? If yes, please provide details."
        ),
        format!(
            "For claim {claim_no}, was a payment issued to the vendor 30+ calendar days after the invoice was received? If yes, please provide details."
        ),
        format!(
            "For claim {claim_no}, did the total payment amount for that claim exceed the total reserved amount for that claim? Please respond yes or no and provide more details if yes"
        ),
        format!(
            "For claim {claim_no}, was a payment made in excess of the performer authority? Please respond yes or no and provide more details if yes."
        ),
    ]
}
