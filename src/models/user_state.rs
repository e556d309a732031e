/// Чего бот ждёт от пользователя следующим сообщением
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingConversion,
}
