use crate::records::CaseRecord;

pub const UNMATCHED_CATEGORY: &str = "Unmatched";

const GCC_NATIONALITIES: &[&str] = &["Ugandan", "Kenyan"];

/// One test against a case record. Rules stay data; the partitioner is the
/// only place that evaluates them. An absent field never matches.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// Visa step contains the phrase.
    StepContains(&'static str),
    /// Visa step contains every phrase.
    StepContainsAll(&'static [&'static str]),
    /// Visa step contains at least one phrase.
    StepContainsAny(&'static [&'static str]),
    /// Pending arrival task contains at least one phrase.
    TaskContainsAny(&'static [&'static str]),
    /// Nationality in the GCC pilot set, GCC status "No", no reference date.
    GccEligibility,
}

impl Predicate {
    pub(crate) fn matches(&self, record: &CaseRecord) -> bool {
        let step = record.visa_step.as_deref();
        let task = record.pending_task.as_deref();
        match self {
            Predicate::StepContains(phrase) => contains(step, phrase),
            Predicate::StepContainsAll(phrases) => {
                !phrases.is_empty() && phrases.iter().all(|phrase| contains(step, phrase))
            }
            Predicate::StepContainsAny(phrases) => {
                phrases.iter().any(|phrase| contains(step, phrase))
            }
            Predicate::TaskContainsAny(phrases) => {
                phrases.iter().any(|phrase| contains(task, phrase))
            }
            Predicate::GccEligibility => {
                let nationality_eligible = record
                    .nationality
                    .as_deref()
                    .map(|value| GCC_NATIONALITIES.contains(&value.trim()))
                    .unwrap_or(false);
                nationality_eligible
                    && record.gcc_status.as_deref().map(str::trim) == Some("No")
                    && record.gcc_ref_date.is_none()
            }
        }
    }
}

fn contains(field: Option<&str>, phrase: &str) -> bool {
    field.map(|text| text.contains(phrase)).unwrap_or(false)
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: &'static str,
    pub predicate: Predicate,
}

/// Ordered, first-match-wins rule set. Order is load-bearing: once a record
/// is claimed by an earlier category it is invisible to every later rule.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn standard() -> Self {
        const MEDICAL_PHRASE: &str =
            "Waiting for the maid to go to medical test and EID fingerprinting";
        const BIOMETRICS_PHRASE: &str = "Pending maid to go for EID Biometrics";

        let rules = vec![
            Rule {
                category: "Push for medical and book bio",
                predicate: Predicate::StepContainsAll(&[BIOMETRICS_PHRASE, MEDICAL_PHRASE]),
            },
            Rule {
                category: "Push for medical",
                predicate: Predicate::StepContains(MEDICAL_PHRASE),
            },
            Rule {
                category: "Push to book bio appointment",
                predicate: Predicate::StepContains("EID fingerprinting"),
            },
            Rule {
                category: "As Aya to book Bio Appointment",
                predicate: Predicate::StepContains("Prepare EID application"),
            },
            Rule {
                category: "Apply Entry Visa",
                predicate: Predicate::StepContains("Apply for entry Visa"),
            },
            Rule {
                category: "Create Offer Letter",
                predicate: Predicate::StepContains("Create Regular Offer Letter"),
            },
            Rule {
                category: "Check Complaints",
                predicate: Predicate::StepContainsAny(&[
                    "Waiting for the PRO Update",
                    "Pending to fix MOHRE issue",
                ]),
            },
            Rule {
                category: "Coaches",
                predicate: Predicate::TaskContainsAny(&[
                    "STAND_UP_SHOOTING",
                    "MATCHING TYPES AND DATA GATHERING",
                ]),
            },
            Rule {
                category: "Onboarding",
                predicate: Predicate::TaskContainsAny(&[
                    "TAWJEEH_TRAINING",
                    "ORIENTATION",
                    "UPLOAD_CERTIFICATE",
                    "MAID_INFO",
                ]),
            },
            Rule {
                category: "Media",
                predicate: Predicate::TaskContainsAny(&["VIDEO_EDITING"]),
            },
            Rule {
                category: "Apply for GCC",
                predicate: Predicate::GccEligibility,
            },
        ];

        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
