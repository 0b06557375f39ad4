//! Static copy for the page: navigation and FAQ.

#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

#[derive(Debug, Clone)]
pub struct PageContent {
    pub title: &'static str,
    pub tagline: &'static str,
    pub nav_links: Vec<NavLink>,
    pub faq: Vec<FaqEntry>,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            title: "VerifAI",
            tagline: "Check a claim or a screenshot before you share it.",
            nav_links: vec![
                NavLink { label: "Text", href: "#text" },
                NavLink { label: "Image", href: "#image" },
                NavLink { label: "FAQ", href: "#faq" },
            ],
            faq: vec![
                FaqEntry {
                    question: "How is the credibility score computed?",
                    answer: "The detection service combines a classical text classifier, a BERT model, \
                             a language-model plausibility check and a search for trusted sources. \
                             The four sub-scores are shown under every result.",
                },
                FaqEntry {
                    question: "What happens to an uploaded image?",
                    answer: "Text is read from the image and scored like a pasted claim, and the image \
                             itself is checked for signs of manipulation. Nothing is stored.",
                },
                FaqEntry {
                    question: "Why does a result say UNVERIFIABLE?",
                    answer: "The claim could not be confirmed or refuted with enough confidence. \
                             Cross-reference it with trusted sources before sharing.",
                },
                FaqEntry {
                    question: "The page says the backend is not reachable.",
                    answer: "The detection services run separately: the text service on port 5000 \
                             and the image service on port 5001. Start them and try again.",
                },
            ],
        }
    }
}
