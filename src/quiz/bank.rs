//! The fixed JavaScript question bank.

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: &'static str,
    pub options: [&'static str; 4],
    /// Index into `options`
    pub correct: usize,
}

impl Question {
    pub fn correct_option(&self) -> &'static str {
        self.options[self.correct]
    }
}

pub static QUESTION_BANK: [Question; 15] = [
    Question {
        text: "What does `typeof null` return?",
        options: ["object", "null", "undefined", "string"],
        correct: 0,
    },
    Question {
        text: "How do you add an element to the end of an array?",
        options: ["push()", "pop()", "shift()", "unshift()"],
        correct: 0,
    },
    Question {
        text: "What is the difference between `==` and `===`?",
        options: [
            "There is no difference",
            "== compares value and type, === compares value only",
            "== compares value only, === compares value and type",
            "Both compare value and type",
        ],
        correct: 2,
    },
    Question {
        text: "How can you create a function in JavaScript?",
        options: [
            "function myFunc() {}",
            "var myFunc = function() {}",
            "let myFunc = () => {}",
            "All of the above",
        ],
        correct: 3,
    },
    Question {
        text: "What is `NaN` in JavaScript?",
        options: [
            "Not a Number",
            "Null and Number",
            "New Array Number",
            "Not Available Now",
        ],
        correct: 0,
    },
    Question {
        text: "How do you remove the last element of an array?",
        options: ["push()", "pop()", "shift()", "unshift()"],
        correct: 1,
    },
    Question {
        text: "What does `this` refer to in JavaScript?",
        options: [
            "Always the current object",
            "The window",
            "The context the function is called from",
            "Nothing",
        ],
        correct: 2,
    },
    Question {
        text: "How do you convert a string to an integer?",
        options: ["parseInt()", "parseFloat()", "Number()", "All of the above"],
        correct: 3,
    },
    Question {
        text: "What is a closure in JavaScript?",
        options: [
            "A function inside a function",
            "A function with access to variables of its outer scope",
            "A function without parameters",
            "A function that returns a value",
        ],
        correct: 1,
    },
    Question {
        text: "How do you check whether an object has a property?",
        options: [
            "hasOwnProperty()",
            "the in operator",
            "typeof",
            "All of the above",
        ],
        correct: 3,
    },
    Question {
        text: "What is event bubbling?",
        options: [
            "The event travels from parent to child",
            "The event travels from child to parent",
            "Stopping the event",
            "Redirecting the event",
        ],
        correct: 1,
    },
    Question {
        text: "How do you make a deep copy of an object?",
        options: [
            "Object.assign()",
            "JSON.parse(JSON.stringify())",
            "spread operator (...)",
            "All of the above",
        ],
        correct: 3,
    },
    Question {
        text: "What is hoisting in JavaScript?",
        options: [
            "Moving declarations to the top of their scope",
            "Hiding variables",
            "Deleting variables",
            "Renaming variables",
        ],
        correct: 0,
    },
    Question {
        text: "How do you stop a loop from running?",
        options: ["break", "continue", "return", "All of the above"],
        correct: 3,
    },
    Question {
        text: "What is a Promise in JavaScript?",
        options: [
            "An object representing an asynchronous operation",
            "A plain function",
            "A variable",
            "An array",
        ],
        correct: 0,
    },
];
