use std::io::{self, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

use crate::{
    board::Board,
    common::{Move, Symbol},
    config::BOARD_SIZE,
    protocol::SessionError,
};

use super::Player;

/// What the human typed at the move prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Move(Move),
    Quit,
}

/// Parse `row col` (or `row,col`), both 0-2, or `q` to quit.
pub fn parse_input(input: &str) -> Result<Input, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input - enter a row and a column, e.g. 1 2".to_string());
    }
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return Ok(Input::Quit);
    }
    let parts: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    let [row_str, col_str] = parts.as_slice() else {
        return Err("Please enter exactly two numbers: row and column".to_string());
    };
    let max = BOARD_SIZE - 1;
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 0-{}", row_str, max))?;
    let col: usize = col_str
        .parse()
        .map_err(|_| format!("Invalid column '{}' - must be a number 0-{}", col_str, max))?;
    Move::new(row, col)
        .map(Input::Move)
        .map_err(|_| format!("Invalid input. Please enter numbers between 0 and {}", max))
}

/// Line reader that several players (and the menu prompts) can take turns on.
pub type SharedInput<R = BufReader<Stdin>> = Arc<Mutex<R>>;

/// Buffered standard input, wrapped for sharing.
pub fn stdin_input() -> SharedInput {
    Arc::new(Mutex::new(BufReader::new(tokio::io::stdin())))
}

/// Read one line, `None` at end of input.
pub async fn read_line<R: AsyncBufRead + Unpin>(input: &SharedInput<R>) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.lock().await.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Human player reading moves from a line-oriented input.
pub struct CliPlayer<R = BufReader<Stdin>> {
    name: String,
    input: SharedInput<R>,
}

impl CliPlayer {
    /// Player reading from its own handle on standard input.
    pub fn new(name: impl Into<String>) -> Self {
        Self::shared(name, stdin_input())
    }
}

impl<R> CliPlayer<R> {
    pub fn from_reader(name: impl Into<String>, input: R) -> Self {
        Self::shared(name, Arc::new(Mutex::new(input)))
    }

    /// Player reading from an input other players also read from.
    pub fn shared(name: impl Into<String>, input: SharedInput<R>) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

#[async_trait::async_trait]
impl<R: AsyncBufRead + Unpin + Send> Player for CliPlayer<R> {
    fn label(&self) -> String {
        self.name.clone()
    }

    async fn select_move(&mut self, board: &Board, symbol: Symbol) -> Result<Move, SessionError> {
        loop {
            print!("{} ({}), enter row and column (0-2), or q to quit: ", self.name, symbol);
            io::stdout().flush()?;
            let Some(line) = read_line(&self.input).await? else {
                return Err(SessionError::Aborted);
            };
            match parse_input(&line) {
                Ok(Input::Quit) => return Err(SessionError::Aborted),
                Ok(Input::Move(mv)) if !board.is_empty(mv.row(), mv.col()) => {
                    println!("✗ That cell is already taken.");
                }
                Ok(Input::Move(mv)) => return Ok(mv),
                Err(e) => println!("✗ {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_and_comma_forms() {
        let expected = Input::Move(Move::new(1, 2).unwrap());
        assert_eq!(parse_input("1 2"), Ok(expected));
        assert_eq!(parse_input(" 1,2 \n"), Ok(expected));
        assert_eq!(parse_input("1, 2"), Ok(expected));
    }

    #[test]
    fn quit_is_case_insensitive() {
        assert_eq!(parse_input("Q"), Ok(Input::Quit));
        assert_eq!(parse_input("quit"), Ok(Input::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_input("").is_err());
        assert!(parse_input("1").is_err());
        assert!(parse_input("a b").is_err());
        assert!(parse_input("3 0").is_err());
        assert!(parse_input("-1 0").is_err());
        assert!(parse_input("1 1 1").is_err());
    }

    #[tokio::test]
    async fn reprompts_until_a_free_cell() {
        let mut board = Board::new();
        board.place(Symbol::O, 0, 0);
        let script: &[u8] = b"nonsense\n0 0\n5 5\n2 1\n";
        let mut player = CliPlayer::from_reader("Ada", BufReader::new(script));
        let mv = player.select_move(&board, Symbol::X).await.unwrap();
        assert_eq!(mv, Move::new(2, 1).unwrap());
    }

    #[tokio::test]
    async fn end_of_input_aborts() {
        let script: &[u8] = b"";
        let mut player = CliPlayer::from_reader("Ada", BufReader::new(script));
        let err = player.select_move(&Board::new(), Symbol::X).await.unwrap_err();
        assert!(matches!(err, SessionError::Aborted));
    }

    #[tokio::test]
    async fn players_sharing_input_take_lines_in_turn() {
        let script: &[u8] = b"0 0\n1 1\n";
        let input = Arc::new(Mutex::new(BufReader::new(script)));
        let mut x = CliPlayer::shared("X", input.clone());
        let mut o = CliPlayer::shared("O", input);
        let board = Board::new();
        assert_eq!(x.select_move(&board, Symbol::X).await.unwrap(), Move::new(0, 0).unwrap());
        assert_eq!(o.select_move(&board, Symbol::O).await.unwrap(), Move::new(1, 1).unwrap());
    }
}
