use super::{Advice, Explanation};
use crate::features::BodySystem;
use crate::risk::RiskTier;

static HEART: [Explanation; 3] = [
    Explanation {
        headline: "Low risk: you're doing well, keep it up!",
        insights: &[
            "Your readings match the low-risk pattern.",
            "Keep maintaining your healthy lifestyle.",
        ],
        advice: Advice {
            tips: &[
                "Eat a balanced diet (fruits, vegetables, low oil/salt)",
                "Walk 30 minutes daily or do light cardio",
                "Avoid smoking and heavy alcohol",
                "Sleep 7-8 hours",
            ],
            tests: &["Yearly health checkup"],
            doctor_prompt: "Can I get a routine heart checkup?",
            urgency: "Routine yearly checkup",
        },
    },
    Explanation {
        headline: "Moderate risk: possible future risk, regular checkups advised.",
        insights: &[
            "You may be developing early warning signs.",
            "Stay alert and monitor your health regularly.",
        ],
        advice: Advice {
            tips: &[
                "Cut salt and sugar",
                "Walk 30+ minutes a day",
                "Reduce fried food, red meat and packaged food",
                "Try deep breathing or light meditation",
                "Track BP weekly if possible",
            ],
            tests: &["Cholesterol panel", "ECG", "Blood pressure"],
            doctor_prompt: "I'd like to check my heart, including cholesterol, ECG and BP.",
            urgency: "Within 1-3 months",
        },
    },
    Explanation {
        headline: "High risk: seek medical attention immediately.",
        insights: &[
            "Very high risk: urgent care may be needed.",
            "Watch for chest pain, fast heartbeat or shortness of breath.",
            "Watch for pain in the left arm, jaw or back.",
        ],
        advice: Advice {
            tips: &["Avoid stress, smoking, heavy lifting and late nights"],
            tests: &["ECG", "Cholesterol and BP test", "Stress test or echo (if advised)"],
            doctor_prompt: "I'm getting a digital heart warning and need a full cardiac checkup.",
            urgency: "Immediately",
        },
    },
];

static BRAIN: [Explanation; 3] = [
    Explanation {
        headline: "Low risk: your readings look okay.",
        insights: &["You're in good condition now, great job!"],
        advice: Advice {
            tips: &[
                "Maintain a healthy weight and BMI",
                "Keep BP and sugar in control with diet and exercise",
                "Practice stress reduction (breathing, nature, less screen time)",
                "Sleep well (7-8 hrs)",
            ],
            tests: &["Full checkup once a year"],
            doctor_prompt: "Can I get a general brain health checkup with ECG, BP, sugar?",
            urgency: "Routine yearly checkup",
        },
    },
    Explanation {
        headline: "Warning: monitor closely and improve your lifestyle.",
        insights: &["You may be at risk from stress, blood pressure, or sugar levels."],
        advice: Advice {
            tips: &[
                "Cut down on salt, fried food and sugar",
                "Walk 30+ minutes daily, avoid late nights",
                "Reduce stress with breathing, yoga or music",
                "Track BP, HR and sugar weekly",
            ],
            tests: &["Blood pressure", "Heart rate", "Blood sugar"],
            doctor_prompt: "Please check my vitals and brain risk. I want early prevention.",
            urgency: "Within 2 weeks",
        },
    },
    Explanation {
        headline: "Emergency risk: seek medical attention urgently!",
        insights: &[
            "Serious red flags detected, act now.",
            "Symptoms may include head pressure, vision issues or unstable walking.",
        ],
        advice: Advice {
            tips: &[
                "Go to the nearest hospital or neurologist",
                "Avoid any stress, intense work or physical activity",
                "Eat light, avoid salt completely",
            ],
            tests: &["CT/MRI", "ECG", "Blood pressure", "Blood work"],
            doctor_prompt: "I received an AI-based brain risk alert. Please do CT/MRI, ECG, BP and blood work immediately.",
            urgency: "Immediately",
        },
    },
];

static LUNGS: [Explanation; 3] = [
    Explanation {
        headline: "Low risk: your breathing indicators look normal.",
        insights: &["Few respiratory symptoms were reported."],
        advice: Advice {
            tips: &[
                "Stay active with regular aerobic exercise",
                "Avoid tobacco smoke and polluted air",
                "Keep vaccinations (flu, pneumonia) up to date",
            ],
            tests: &["Routine checkup"],
            doctor_prompt: "Can you listen to my lungs during my next routine visit?",
            urgency: "Routine yearly checkup",
        },
    },
    Explanation {
        headline: "Moderate risk: several respiratory warning signs.",
        insights: &["Your symptoms suggest reduced lung function or airway irritation."],
        advice: Advice {
            tips: &[
                "Stop smoking and avoid second-hand smoke",
                "Wear a mask around dust or fumes",
                "Track coughing and breathlessness daily",
            ],
            tests: &["Spirometry", "Pulse oximetry", "Chest X-ray (if advised)"],
            doctor_prompt: "I have ongoing cough and breathlessness. Can I get a lung function test?",
            urgency: "Within 2-4 weeks",
        },
    },
    Explanation {
        headline: "High risk: significant breathing problems detected.",
        insights: &[
            "Low oxygen or severe breathlessness needs prompt attention.",
            "Seek emergency care if lips turn bluish or breathing worsens at rest.",
        ],
        advice: Advice {
            tips: &["Rest and avoid exertion", "Stay away from smoke and pollutants"],
            tests: &["Pulse oximetry", "Spirometry", "Chest X-ray or CT"],
            doctor_prompt: "My oxygen is low and I'm short of breath. I need a full lung assessment.",
            urgency: "Within 24-48 hours",
        },
    },
];

static LIVER: [Explanation; 3] = [
    Explanation {
        headline: "Low risk: liver markers look healthy.",
        insights: &["Enzymes and bilirubin are within typical ranges."],
        advice: Advice {
            tips: &[
                "Limit alcohol",
                "Keep a healthy weight",
                "Avoid unnecessary medication and supplements",
            ],
            tests: &["Liver function test with routine bloods"],
            doctor_prompt: "Can you include a liver panel in my yearly bloods?",
            urgency: "Routine yearly checkup",
        },
    },
    Explanation {
        headline: "Moderate risk: some liver stress indicators.",
        insights: &["Symptoms or lab values suggest the liver may be under strain."],
        advice: Advice {
            tips: &[
                "Stop or sharply reduce alcohol",
                "Cut fried and processed food",
                "Review medications with your doctor",
            ],
            tests: &["Liver function test", "Hepatitis screening", "Abdominal ultrasound"],
            doctor_prompt: "My liver enzymes may be raised. Can we repeat the liver panel?",
            urgency: "Within 2-4 weeks",
        },
    },
    Explanation {
        headline: "High risk: strong signs of liver dysfunction.",
        insights: &[
            "Jaundice, raised bilirubin or low albumin need prompt evaluation.",
            "Avoid alcohol completely until assessed.",
        ],
        advice: Advice {
            tips: &["Avoid alcohol and paracetamol overuse", "Eat light, stay hydrated"],
            tests: &["Liver function test", "Abdominal ultrasound", "Coagulation profile"],
            doctor_prompt: "I have jaundice and abnormal liver results. I need an urgent liver assessment.",
            urgency: "Within 1 week",
        },
    },
];

static KIDNEY: [Explanation; 3] = [
    Explanation {
        headline: "Low risk: kidney indicators look normal.",
        insights: &["Creatinine and urine markers are in typical ranges."],
        advice: Advice {
            tips: &["Drink enough water", "Limit salt", "Avoid overuse of painkillers"],
            tests: &["Routine urine test and creatinine"],
            doctor_prompt: "Can you include kidney function in my routine bloods?",
            urgency: "Routine yearly checkup",
        },
    },
    Explanation {
        headline: "Moderate risk: early kidney stress signs.",
        insights: &["Blood pressure, sugar or urine findings suggest the kidneys need monitoring."],
        advice: Advice {
            tips: &[
                "Keep blood pressure and sugar controlled",
                "Reduce salt and processed food",
                "Avoid NSAID painkillers",
            ],
            tests: &["Serum creatinine and eGFR", "Urine albumin-creatinine ratio", "Blood pressure"],
            doctor_prompt: "I'd like a kidney function check, including eGFR and urine albumin.",
            urgency: "Within 1 month",
        },
    },
    Explanation {
        headline: "High risk: significant kidney warning signs.",
        insights: &[
            "Raised creatinine with protein in urine suggests reduced kidney function.",
            "Swelling or reduced urination needs prompt review.",
        ],
        advice: Advice {
            tips: &["Limit salt and potassium-rich processed food", "Do not start new medication without advice"],
            tests: &["Serum creatinine and eGFR", "Urine albumin", "Kidney ultrasound"],
            doctor_prompt: "My kidney markers look abnormal. I need an urgent nephrology review.",
            urgency: "Within 1 week",
        },
    },
];

static DIABETES: [Explanation; 3] = [
    Explanation {
        headline: "Low risk: blood sugar indicators look normal.",
        insights: &["Fasting, post-meal sugar and HbA1c are below diabetic thresholds."],
        advice: Advice {
            tips: &["Keep active daily", "Limit sugary drinks", "Maintain a healthy weight"],
            tests: &["Fasting glucose once a year"],
            doctor_prompt: "Can you check my fasting sugar at my yearly visit?",
            urgency: "Routine yearly checkup",
        },
    },
    Explanation {
        headline: "Moderate risk: signs of impaired sugar control.",
        insights: &["Symptoms or sugar readings point toward prediabetes."],
        advice: Advice {
            tips: &[
                "Cut refined carbs and sugar",
                "Walk 30+ minutes after meals",
                "Aim for gradual weight loss if overweight",
            ],
            tests: &["HbA1c", "Fasting and post-meal glucose"],
            doctor_prompt: "My sugar readings are borderline. Can we check HbA1c?",
            urgency: "Within 1 month",
        },
    },
    Explanation {
        headline: "High risk: readings consistent with diabetes.",
        insights: &[
            "Several sugar markers are at or above diagnostic thresholds.",
            "Early treatment prevents damage to eyes, kidneys and nerves.",
        ],
        advice: Advice {
            tips: &["Avoid sugary food and drinks", "Monitor blood sugar daily"],
            tests: &["HbA1c", "Fasting glucose", "Kidney and eye screening"],
            doctor_prompt: "My sugar markers are high. I need a diabetes evaluation.",
            urgency: "Within 1-2 weeks",
        },
    },
];

pub(super) fn lookup(system: BodySystem, tier: RiskTier) -> &'static Explanation {
    let table = match system {
        BodySystem::Heart => &HEART,
        BodySystem::Brain => &BRAIN,
        BodySystem::Lungs => &LUNGS,
        BodySystem::Liver => &LIVER,
        BodySystem::Kidney => &KIDNEY,
        BodySystem::Diabetes => &DIABETES,
    };
    &table[tier.index()]
}
