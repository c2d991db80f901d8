//! Static preview documents, one per template.

use crate::models::resume::{Contact, EducationItem, ExperienceItem, ResumeDocument, Skills};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn role(role: &str, company: &str, location: Option<&str>, start: &str, end: &str, bullets: &[&str]) -> ExperienceItem {
    ExperienceItem {
        role: role.to_string(),
        company: company.to_string(),
        location: location.map(str::to_string),
        start: start.to_string(),
        end: end.to_string(),
        bullets: strings(bullets),
    }
}

fn school(degree: &str, institution: &str, start: &str, end: &str, details: Option<&str>) -> EducationItem {
    EducationItem {
        institution: institution.to_string(),
        degree: degree.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        details: details.map(str::to_string),
    }
}

fn contact(name: &str, headline: &str, email: &str, phone: &str, location: &str, links: &[&str]) -> Contact {
    Contact {
        name: name.to_string(),
        headline: headline.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        location: location.to_string(),
        links: strings(links),
    }
}

pub fn classic() -> ResumeDocument {
    ResumeDocument {
        contact: contact(
            "Avery Johnson",
            "Product Strategy Lead",
            "avery.johnson@email.com",
            "+1 555 321 4567",
            "Austin, TX",
            &["linkedin.com/in/averyjohnson"],
        ),
        summary: Some(
            "Strategic product leader with 8+ years of experience translating customer insights into lovable digital experiences. Excels at cross-functional collaboration and data-guided roadmaps."
                .to_string(),
        ),
        experience: vec![
            role(
                "Product Lead",
                "Brightwave",
                Some("Austin, TX"),
                "2020",
                "Present",
                &[
                    "Scaled product discovery practice resulting in 3x more validated concepts per quarter.",
                    "Led launch of onboarding revamp that reduced time-to-value by 46%.",
                ],
            ),
            role(
                "Senior Product Manager",
                "FlowPath",
                Some("Remote"),
                "2016",
                "2020",
                &[
                    "Delivered analytics module generating $4.2M ARR in year one.",
                    "Mentored 4 PMs and introduced OKR ritual improving focus across squads.",
                ],
            ),
        ],
        education: vec![school(
            "MBA, Innovation Management",
            "University of Texas",
            "2014",
            "2016",
            Some("Graduated with honors, VP of Product Club."),
        )],
        skills: Skills {
            core: strings(&["Product Strategy", "Customer Discovery", "Roadmapping", "Analytics"]),
            soft: strings(&["Stakeholder Alignment", "Coaching", "Public Speaking"]),
        },
        certifications: strings(&["Pragmatic Certified Product Manager"]),
        projects: strings(&["Built internal experimentation playbook adopted by 9 teams."]),
        languages: Vec::new(),
    }
}

pub fn creative() -> ResumeDocument {
    ResumeDocument {
        contact: contact(
            "Catherine Barnett",
            "3D Character Animator",
            "cath@novoresume.com",
            "123 444 5555",
            "Montreal, Canada",
            &["linkedin.com/in/c.barnett"],
        ),
        summary: Some(
            "Hard-working animator with 3+ years of professional experience in 3D modeling and animation. Looking for a place to thrive at Cool Story Game Studios. Deep knowledge of Blender, rigging, and cinematic pre-visualization."
                .to_string(),
        ),
        experience: vec![
            role(
                "3D Character Animator",
                "Iceberg Games Inc.",
                None,
                "04/2023",
                "Present",
                &[
                    "Delivered complex animation sequences contributing to 35% increase in player immersion.",
                    "Collaborated with designers to match characters' personality to narrative arcs.",
                    "Trained 3 junior animators and upheld 200+ hours of gameplay deadlines.",
                ],
            ),
            role(
                "Animator & Designer",
                "Laughtrack Studios",
                None,
                "01/2021",
                "03/2023",
                &[
                    "Designed characters & environments in coordination with storyboards.",
                    "Optimized 3D art pipeline, finishing launches 3 weeks ahead of schedule.",
                ],
            ),
        ],
        education: vec![school("BFA in Animation", "New York University", "2018", "2021", None)],
        skills: Skills {
            core: strings(&[
                "Character-based VFX",
                "3D Modeling",
                "ZBrush",
                "Rigging",
                "Skeletal Animation",
                "Blender",
                "Adobe Creative Suite",
            ]),
            soft: strings(&["Attention to Detail", "Collaboration", "Problem-solving"]),
        },
        certifications: strings(&[
            "Kawaii Character Creation in 3D",
            "ZBrush Crash Course",
            "Introduction to 3D Animation",
        ]),
        projects: Vec::new(),
        languages: strings(&["English", "French", "Spanish"]),
    }
}

pub fn pastel() -> ResumeDocument {
    ResumeDocument {
        contact: contact(
            "Christopher Panattoni",
            "Bartender",
            "christopher.panattoni@contact.com",
            "281-951-6550",
            "Houston, TX",
            &["linkedin.com/in/panattonichris"],
        ),
        summary: Some(
            "Dedicated bartender with 5+ years of experience creating memorable experiences for patrons in high-paced establishments. Skilled at fostering positive atmospheres and exceeding sales targets."
                .to_string(),
        ),
        experience: vec![
            role(
                "Bartender",
                "Cheers & Chill Lounge",
                None,
                "2019",
                "Present",
                &[
                    "Managed nightly volume of 200 guests with consistent 5-star reviews.",
                    "Introduced upsell program increasing beverage sales by 15%.",
                ],
            ),
            role(
                "Bartender",
                "Sip & Savor Bar",
                None,
                "2017",
                "2019",
                &[
                    "Maintained bar cleanliness meeting all health inspection standards.",
                    "Grew repeat customer base through personalized recommendations.",
                ],
            ),
        ],
        education: vec![school(
            "High School Diploma",
            "Willowridge High School, Houston, TX",
            "2011",
            "2014",
            None,
        )],
        skills: Skills {
            core: strings(&["Mixology", "Customer Service", "Order Management", "Inventory"]),
            soft: Vec::new(),
        },
        certifications: Vec::new(),
        projects: Vec::new(),
        languages: strings(&["Spanish", "Italian"]),
    }
}

pub fn timeline() -> ResumeDocument {
    ResumeDocument {
        contact: contact(
            "Ahmdd Saah",
            "Marketing Manager",
            "hello@ahmdd saaahh.com",
            "+124-4236-7894",
            "Any City",
            &["www.ahmdd saaahh.com"],
        ),
        summary: Some(
            "Marketing leader who translates strategy into actionable campaigns. Experienced guiding teams through omni-channel initiatives that elevate brand positioning and drive measurable results."
                .to_string(),
        ),
        experience: vec![
            role(
                "Marketing Manager & Specialist",
                "Borcelle Studio",
                Some("Remote"),
                "2030",
                "Present",
                &[
                    "Implemented cross-channel GTM playbook increasing pipeline velocity by 28%.",
                    "Launched content automation workflow saving 240 work hours quarterly.",
                ],
            ),
            role(
                "Marketing Manager & Specialist",
                "Fauget Studio",
                None,
                "2025",
                "2029",
                &[
                    "Guided influencer partnerships boosting brand reach in APAC by 36%.",
                    "Mentored 6 marketers across creative and analytics teams.",
                ],
            ),
        ],
        education: vec![
            school("Master of Business Management", "Wardiere University", "2029", "2031", None),
            school("BSc, Economics", "Columbus University", "2003", "2007", None),
        ],
        skills: Skills {
            core: strings(&[
                "Strategic Planning",
                "Problem Solving",
                "Data Analysis",
                "Brand Development",
                "Negotiation",
            ]),
            soft: strings(&["Stakeholder Engagement", "Strategic Focus"]),
        },
        certifications: Vec::new(),
        projects: Vec::new(),
        languages: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_stable() {
        assert_eq!(classic(), classic());
        assert_eq!(timeline().education.len(), 2);
    }

    #[test]
    fn test_samples_survive_wire_round_trip() {
        for doc in [classic(), creative(), pastel(), timeline()] {
            let value = serde_json::to_value(&doc).unwrap();
            let back = ResumeDocument::from_value(value.as_object().unwrap());
            assert_eq!(back, doc);
        }
    }
}
