/// How the dialog was closed. The code doubles as the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResponse {
    Ok,
    Cancel,
    Timeout,
    Escape,
    Signal(i32),
}

impl DialogResponse {
    pub fn code(self) -> i32 {
        match self {
            DialogResponse::Ok => 0,
            DialogResponse::Cancel => 1,
            DialogResponse::Timeout => 70,
            DialogResponse::Escape => 252,
            DialogResponse::Signal(code) => code,
        }
    }

    /// Only a confirmed dialog prints its result.
    pub fn prints_result(self) -> bool {
        self == DialogResponse::Ok
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Close(DialogResponse),
}
