//! Built-in sample document and image list.
//!
//! Used as the default payload of the web endpoint and as a fixture in tests.

use crate::core::candidate::Candidate;

pub const SAMPLE_DOCUMENT: &str = "Intro stuff, not relevant.

Email Comp: EOY URGENCY 12/30 7a MASS

Some text in between...

Email Comp: EOY FINAL STRETCH 12/30 9a MONTHLY

Another paragraph...

Email Comp: EOY FINAL STRETCH 12/30 7p LEADERSHIPHP

More random content...

Email Comp: EOY FINAL STRETCH 12/31 8a MAJOR";

const SAMPLE_IMAGES: [(&str, &str); 4] = [
    ("EOY_FS_Mass_12_30_7am.png", "https://box.com/file/mass-7am"),
    ("EOY_FS_Monthly_12_30_9am.png", "https://box.com/file/monthly-9am"),
    (
        "EOY_FS_LeadershipHP_12_30_7pm.png",
        "https://box.com/file/leadershiphp-7pm",
    ),
    ("EOY_FS_Major_12_31_8am.png", "https://box.com/file/major-8am"),
];

/// The sample image list, in storage order
#[must_use]
pub fn sample_candidates() -> Vec<Candidate> {
    SAMPLE_IMAGES
        .iter()
        .map(|(name, url)| Candidate::new(*name).with_url(*url))
        .collect()
}
