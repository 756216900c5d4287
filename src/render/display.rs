/// Where the score, the game-over banner and the restart countdown are shown
pub trait DisplaySink {
    fn set_score(&mut self, score: u32);

    fn show_game_over(&mut self, final_score: u32);

    fn hide_game_over(&mut self);

    fn set_countdown(&mut self, remaining: u32);
}
