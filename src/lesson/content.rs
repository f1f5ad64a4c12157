//! Lesson text: limits and the definition of the derivative

use super::{
    DiagnosticFeedback, DiagnosticOption, DiagnosticQuestion, LessonBlock, PracticeOption,
    PracticeQuestion,
};

pub const LESSON_BLOCKS: &[LessonBlock] = &[
    LessonBlock {
        id: "core-idea",
        title: "Limits describe approach",
        text: "A limit tells you what value a function is heading toward as x gets close to a point. It does not require the function to actually land there.",
    },
    LessonBlock {
        id: "approach-not-equal",
        title: "Approach vs. equal",
        text: "f(2) and lim(x→2) f(x) are related but not the same. The limit is about nearby x-values, not the exact point.",
    },
    LessonBlock {
        id: "graph-vs-value",
        title: "Graph shape matters",
        text: "When reading a limit from a graph, focus on where the curve is heading from both sides, not just the single dot.",
    },
    LessonBlock {
        id: "two-sided",
        title: "Two-sided limits",
        text: "A two-sided limit exists only when the left-hand and right-hand limits match.",
    },
];

pub const BRIDGE_LINES: &[&str] = &[
    "Average rate of change over [a, b] is the slope of the secant line: (f(b) − f(a)) / (b − a).",
    "If we slide b closer to a, the secant line tilts toward a tangent line.",
    "That limiting slope is the instantaneous rate of change at a.",
];

pub const DEFINITION_LINES: &[&str] = &[
    "The derivative at x is defined by a limit:",
    "f'(x) = lim(h→0) (f(x+h) − f(x)) / h",
    "It measures how fast the function is changing at a single instant.",
];

pub const DIAGNOSTIC_QUESTIONS: &[DiagnosticQuestion] = &[
    DiagnosticQuestion {
        id: "q1",
        prompt: "If lim(x→2) f(x) = 5, which statement must be true?",
        options: &[
            DiagnosticOption { id: "q1a", text: "f(2) = 5" },
            DiagnosticOption { id: "q1b", text: "f(x) is close to 5 when x is close to 2" },
            DiagnosticOption { id: "q1c", text: "f(x) is exactly 5 for all x near 2" },
        ],
    },
    DiagnosticQuestion {
        id: "q2",
        prompt: "The graph of f has a hole at x = 3 but the curve approaches 7 there. The limit is:",
        options: &[
            DiagnosticOption { id: "q2a", text: "7" },
            DiagnosticOption { id: "q2b", text: "Undefined because there is a hole" },
            DiagnosticOption { id: "q2c", text: "Whatever f(3) is" },
        ],
    },
    DiagnosticQuestion {
        id: "q3",
        prompt: "A limit describes:",
        options: &[
            DiagnosticOption { id: "q3a", text: "A value at a single point" },
            DiagnosticOption { id: "q3b", text: "A value the function approaches near a point" },
            DiagnosticOption { id: "q3c", text: "The average rate of change around a point" },
        ],
    },
    DiagnosticQuestion {
        id: "q4",
        prompt: "If the left-hand limit is 4 and the right-hand limit is 6 at x = 1, then the limit is:",
        options: &[
            DiagnosticOption { id: "q4a", text: "5" },
            DiagnosticOption { id: "q4b", text: "Does not exist" },
            DiagnosticOption { id: "q4c", text: "f(1)" },
        ],
    },
    DiagnosticQuestion {
        id: "q5",
        prompt: "Average rate of change from x = 2 to x = 3 is about 4. What happens as the interval shrinks?",
        options: &[
            DiagnosticOption { id: "q5a", text: "It approaches the instantaneous rate of change" },
            DiagnosticOption { id: "q5b", text: "It stays the same because the average is fixed" },
            DiagnosticOption { id: "q5c", text: "It becomes undefined for small intervals" },
        ],
    },
];

pub const DIAGNOSTIC_FEEDBACK: &[DiagnosticFeedback] = &[
    DiagnosticFeedback {
        question_id: "q1",
        correct_option_id: "q1b",
        feedback: &[
            ("q1a", "Not quite. The limit talks about values near 2, not the exact value at 2."),
            ("q1b", "Correct. A limit describes what f(x) approaches as x gets close to 2."),
            ("q1c", "Not quite. The function doesn’t have to be exactly 5 near 2, just close."),
        ],
    },
    DiagnosticFeedback {
        question_id: "q2",
        correct_option_id: "q2a",
        feedback: &[
            ("q2a", "Correct. The limit is about the y-value the curve approaches."),
            ("q2b", "Not quite. A hole doesn’t prevent a limit from existing."),
            ("q2c", "Not quite. The limit can exist even if f(3) is different or missing."),
        ],
    },
    DiagnosticFeedback {
        question_id: "q3",
        correct_option_id: "q3b",
        feedback: &[
            ("q3a", "Not quite. A limit is about nearby values, not just the single point."),
            ("q3b", "Correct. It’s the value the function approaches near a point."),
            ("q3c", "Not quite. Average rate of change is slope, not the definition of a limit."),
        ],
    },
    DiagnosticFeedback {
        question_id: "q4",
        correct_option_id: "q4b",
        feedback: &[
            ("q4a", "Not quite. If left and right limits differ, the two-sided limit does not exist."),
            ("q4b", "Correct. The left and right sides disagree, so there’s no single limit value."),
            ("q4c", "Not quite. The limit doesn’t depend on the actual value f(1)."),
        ],
    },
    DiagnosticFeedback {
        question_id: "q5",
        correct_option_id: "q5a",
        feedback: &[
            ("q5a", "Correct. Shrinking the interval leads to the instantaneous rate of change."),
            ("q5b", "Not quite. The average changes as the interval shrinks."),
            ("q5c", "Not quite. The average rate is still defined for tiny intervals."),
        ],
    },
];

pub const PRACTICE_QUESTIONS: &[PracticeQuestion] = &[
    PracticeQuestion {
        id: "p1",
        prompt: "1) If f'(3) = 5, what does that mean in words?",
        options: &[
            PracticeOption {
                id: "p1a",
                text: "The slope of the tangent line at x = 3 is 5.",
                feedback: "Yes. The derivative is the instantaneous rate of change (slope) at that point.",
            },
            PracticeOption {
                id: "p1b",
                text: "The function equals 5 at x = 3.",
                feedback: "Not quite. f'(3) is about slope, not the function value.",
            },
        ],
        allow_text: false,
    },
    PracticeQuestion {
        id: "p2",
        prompt: "2) Use the definition: if f(x) = x², what is f'(1)?",
        options: &[
            PracticeOption {
                id: "p2a",
                text: "2",
                feedback: "Correct. ( (1+h)² − 1 ) / h = (2h + h²)/h = 2 + h → 2.",
            },
            PracticeOption {
                id: "p2b",
                text: "1",
                feedback: "Close, but the limit gives 2. Try expanding (1+h)².",
            },
            PracticeOption {
                id: "p2c",
                text: "0",
                feedback: "Not quite. The slope at x = 1 for x² is 2.",
            },
        ],
        allow_text: false,
    },
    PracticeQuestion {
        id: "p3",
        prompt: "3) Fill in the blank: A limit can exist even if f(a) is ________.",
        options: &[
            PracticeOption {
                id: "p3a",
                text: "undefined",
                feedback: "Yes. The function value can be undefined while the limit still exists.",
            },
            PracticeOption {
                id: "p3b",
                text: "different",
                feedback: "That can be true too, but the key idea is that f(a) doesn’t have to exist.",
            },
        ],
        allow_text: true,
    },
    PracticeQuestion {
        id: "p4",
        prompt: "4) Using the definition, which expression represents f'(x)?",
        options: &[
            PracticeOption {
                id: "p4a",
                text: "lim(h→0) (f(x+h) − f(x)) / h",
                feedback: "Correct. That is the limit definition of the derivative.",
            },
            PracticeOption {
                id: "p4b",
                text: "lim(x→0) f(x) / x",
                feedback: "Not quite. That is a limit, but it doesn’t match the derivative definition.",
            },
            PracticeOption {
                id: "p4c",
                text: "(f(x) − f(0)) / x",
                feedback: "Not quite. This is a secant slope unless you take a limit as x→0.",
            },
        ],
        allow_text: false,
    },
    PracticeQuestion {
        id: "p5",
        prompt: "5) If f(x) = 3x, what is f'(2) using the definition?",
        options: &[
            PracticeOption {
                id: "p5a",
                text: "3",
                feedback: "Correct. The slope of 3x is constant, so the derivative is 3.",
            },
            PracticeOption {
                id: "p5b",
                text: "6",
                feedback: "Not quite. f'(2) is the slope, not the function value.",
            },
            PracticeOption {
                id: "p5c",
                text: "2",
                feedback: "Not quite. The derivative of 3x is 3 for all x.",
            },
        ],
        allow_text: false,
    },
];

// Scripted tutor lines

pub const GREETING: &str =
    "Hi! I’m your tutor. We’ll start with a warmup then begin the lesson.";
pub const DIAGNOSTIC_LEAD_IN: &str = "Here are some questions to get started:";
pub const DIAGNOSTIC_DONE: &str = "Great! Let's get started on the lesson.";
pub const LESSON_LEAD_IN: &str = "Let's start the lesson";
pub const LESSON_CLOSERS: &[&str] = &[
    "If you want another phrasing, just ask.",
    "Ready to connect this to rates of change?",
];
pub const BRIDGE_LEAD_IN: &str =
    "Now, let's consider the rate of change, or slope, at a single point.";
pub const BRIDGE_CLOSER: &str = "Ready for the formal derivative definition?";
pub const DEFINITION_LEAD_IN: &str = "Definition of the derivative:";
pub const DEFINITION_CLOSER: &str = "Want to try a few practice questions?";
pub const PRACTICE_LEAD_IN: &str = "Practice time.";
pub const PRACTICE_DONE: &str = "Nice work. Want to review anything or ask a question?";
