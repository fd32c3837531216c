//! Fixed replies the intake flow sends without consulting the oracle.

/// Reserved message a client sends to open a session.
pub const INIT_TOKEN: &str = "__INIT__";

/// Token that approves a phase or the final hand-off.
pub const APPROVAL_TOKEN: &str = "approved";

pub const WELCOME: &str = "Hi! I'm here to help turn your idea into a clear brief for our delivery team. \
To start, tell me about the business problem you're facing: what isn't working today, and who does it affect?";

pub const SOLUTION_SKIP_ACK: &str = "Thanks, it sounds like you already have a solution in mind, so let's skip ahead. \
What features should it have? List everything you can think of, and I'll help organise them.";

pub const APPROVAL_PROMPT: &str = "If this looks right, type \"Approved\" to continue, or tell me what to change.";

pub const FEATURES_PROMPT: &str = "Great, the solution idea is approved. \
Now let's pin down the features. What should the solution be able to do?";

/// Hidden instruction the oracle receives when the feature list is approved.
pub const USER_STORIES_DIRECTIVE: &str = "The feature list is approved. \
Write the user stories for every agreed feature.";

pub const CONTACT_REQUEST: &str = "Everything is ready to send to our team. \
Please share your name and phone number in the format: Name, +60123456789";

pub const CONTACT_FORMAT_ERROR: &str = "Sorry, I couldn't read that. \
Please send your name and phone number on one line, like this: Jane Doe, +60123456789";

pub const HANDOFF_SUCCESS: &str = "Your request has been sent to our team. \
They will contact you shortly. Thank you!";

pub const HANDOFF_FAILURE: &str = "Sorry, we couldn't send your request just now. \
Please type \"Approved\" again to retry.";

pub const ALREADY_SUBMITTED: &str = "Your request has already been sent to our team. \
Start a new session if you have another idea.";

/// Asks the user to confirm sending once contact details are known.
pub fn confirm_send(name: &str) -> String {
    format!(
        "Thanks, {}! Type \"Approved\" to send your request to our team.",
        name
    )
}

/// Appends the approval prompt to an oracle reply.
pub fn with_approval_prompt(reply: &str) -> String {
    format!("{}\n\n{}", reply.trim_end(), APPROVAL_PROMPT)
}

/// True when `input` is exactly the approval token, ignoring case and
/// surrounding whitespace.
pub fn is_approval(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(APPROVAL_TOKEN)
}
