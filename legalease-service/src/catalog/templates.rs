//! Fill-in-the-blanks document templates.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Template {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub template: &'static str,
}

/// Listing entry: a template without its body.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TemplateSummary {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

impl From<&Template> for TemplateSummary {
    fn from(t: &Template) -> Self {
        Self {
            name: t.name,
            category: t.category,
            description: t.description,
        }
    }
}

pub static TEMPLATES: &[(&str, Template)] = &[
    (
        "nda",
        Template {
            name: "Non-Disclosure Agreement (NDA)",
            category: "Contracts",
            description: "Template for protecting confidential information",
            template: r#"NON-DISCLOSURE AGREEMENT

This Non-Disclosure Agreement ("Agreement") is entered into on [DATE] between:
Disclosing Party: [NAME], [ADDRESS]
Receiving Party: [NAME], [ADDRESS]

1. DEFINITION OF CONFIDENTIAL INFORMATION
Confidential Information includes, but is not limited to: [SPECIFY SCOPE]

2. OBLIGATIONS
The Receiving Party agrees to:
- Maintain confidentiality of all Confidential Information
- Use Confidential Information solely for [PURPOSE]
- Not disclose Confidential Information to third parties without prior written consent

3. EXCEPTIONS
Confidential Information does not include information that:
- Is publicly known at the time of disclosure
- Was independently developed without use of Confidential Information
- Is required to be disclosed by law

4. DURATION
This Agreement shall remain in effect for [DURATION] years from the date of execution.

5. REMEDIES
Breach of this Agreement may result in irreparable harm, and the Disclosing Party may seek injunctive relief.

IN WITNESS WHEREOF, the parties have executed this Agreement as of the date first written above.

Disclosing Party: _________________    Receiving Party: _________________
Date: _______________                 Date: _______________"#,
        },
    ),
    (
        "employment_contract",
        Template {
            name: "Employment Contract",
            category: "Employment",
            description: "Standard employment agreement template",
            template: r#"EMPLOYMENT AGREEMENT

This Employment Agreement ("Agreement") is made on [DATE] between:
Employer: [COMPANY NAME], [ADDRESS]
Employee: [NAME], [ADDRESS]

1. POSITION AND DUTIES
Employee agrees to serve as [POSITION] and perform duties as assigned by Employer.

2. COMPENSATION
- Base Salary: $[AMOUNT] per [PERIOD]
- Benefits: [SPECIFY BENEFITS]
- Bonus: [IF APPLICABLE]

3. TERM
Employment shall commence on [START DATE] and continue until terminated by either party with [NOTICE PERIOD] notice.

4. CONFIDENTIALITY
Employee agrees to maintain confidentiality of all proprietary information during and after employment.

5. NON-COMPETE
[IF APPLICABLE: Specify geographic and temporal restrictions]

6. TERMINATION
Either party may terminate this Agreement with or without cause, subject to notice requirements.

IN WITNESS WHEREOF, the parties have executed this Agreement.

Employer: _________________           Employee: _________________
Date: _______________                 Date: _______________"#,
        },
    ),
    (
        "privacy_policy",
        Template {
            name: "Privacy Policy",
            category: "Compliance",
            description: "Website privacy policy template",
            template: r#"PRIVACY POLICY

Effective Date: [DATE]

[COMPANY NAME] ("we," "our," or "us") respects your privacy. This Privacy Policy explains how we collect, use, and protect your personal information.

1. INFORMATION WE COLLECT
- Personal Information: Name, email, address, phone number
- Technical Information: IP address, browser type, device information
- Usage Data: How you interact with our services

2. HOW WE USE YOUR INFORMATION
We use collected information to:
- Provide and improve our services
- Communicate with you
- Comply with legal obligations
- Protect our rights and prevent fraud

3. INFORMATION SHARING
We do not sell your personal information. We may share information with:
- Service providers who assist in operations
- Legal authorities when required by law
- Business partners with your consent

4. DATA SECURITY
We implement reasonable security measures to protect your information.

5. YOUR RIGHTS
You have the right to:
- Access your personal information
- Request correction or deletion
- Opt-out of certain communications
- File a complaint with relevant authorities

6. COOKIES
We use cookies to enhance user experience. You can control cookies through your browser settings.

7. CHANGES TO THIS POLICY
We may update this Privacy Policy. Continued use constitutes acceptance of changes.

Contact Us: [EMAIL] | [ADDRESS]"#,
        },
    ),
    (
        "service_agreement",
        Template {
            name: "Service Agreement",
            category: "Contracts",
            description: "Template for service provider agreements",
            template: r#"SERVICE AGREEMENT

This Service Agreement ("Agreement") is entered into on [DATE] between:
Service Provider: [NAME], [ADDRESS]
Client: [NAME], [ADDRESS]

1. SERVICES
Service Provider agrees to provide the following services: [DESCRIBE SERVICES]

2. PAYMENT
- Service Fee: $[AMOUNT]
- Payment Terms: [NET 30/UPFRONT/etc.]
- Late Fees: [IF APPLICABLE]

3. TERM AND TERMINATION
This Agreement shall commence on [START DATE] and continue until [END DATE] or terminated by either party with [NOTICE] days' notice.

4. INTELLECTUAL PROPERTY
All work product shall be owned by [SPECIFY OWNERSHIP].

5. WARRANTIES AND DISCLAIMERS
Service Provider warrants services will be performed in a professional manner. [DISCLAIMERS]

6. LIMITATION OF LIABILITY
Service Provider's liability is limited to the amount paid for services.

7. GOVERNING LAW
This Agreement shall be governed by the laws of [JURISDICTION].

IN WITNESS WHEREOF, the parties have executed this Agreement.

Service Provider: _________________    Client: _________________
Date: _______________                 Date: _______________"#,
        },
    ),
];

pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES
        .iter()
        .find(|(template_id, _)| *template_id == id)
        .map(|(_, template)| template)
}
