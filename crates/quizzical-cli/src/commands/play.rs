use std::error::Error;
use std::io::Write;
use std::time::Duration;

use clap::Args;
use quizzical_core::quiz::resolve_category_id;
use quizzical_core::session::now_ms;
use quizzical_core::{
    CategoryProvider, CategorySelection, Config, Difficulty, Launch, OpenTdbClient,
    QuestionProvider, QuizController, QuizRequest,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::render;

type Input = Lines<BufReader<Stdin>>;

#[derive(Args)]
pub struct PlayArgs {
    /// Number of questions
    #[arg(long, short = 'n')]
    pub amount: Option<u32>,
    /// Difficulty (easy, medium, hard)
    #[arg(long, short)]
    pub difficulty: Option<Difficulty>,
    /// Category name, or "Mixed"
    #[arg(long, short)]
    pub category: Option<CategorySelection>,
    /// Play without the countdown
    #[arg(long)]
    pub untimed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// 1-based question and choice numbers as typed.
    Select { question: usize, choice: usize },
    Show,
    Time,
    Submit,
    Quit,
    Help,
}

fn parse_command(input: &str) -> Option<Command> {
    let mut parts = input.split_whitespace();
    let first = parts.next()?;
    let command = match first.to_ascii_lowercase().as_str() {
        "show" | "s" => Command::Show,
        "time" | "t" => Command::Time,
        "submit" => Command::Submit,
        "quit" | "q" => Command::Quit,
        "help" | "?" => Command::Help,
        _ => {
            let question = first.parse().ok()?;
            let choice = parts.next()?.parse().ok()?;
            Command::Select { question, choice }
        }
    };
    match parts.next() {
        Some(_) => None,
        None => Some(command),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Again,
    Home,
    Quit,
}

fn parse_next(input: &str) -> Option<Next> {
    match input.trim().to_ascii_lowercase().as_str() {
        "again" | "a" => Some(Next::Again),
        "home" | "h" => Some(Next::Home),
        "quit" | "q" => Some(Next::Quit),
        _ => None,
    }
}

pub async fn run(args: PlayArgs) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    if args.untimed {
        config.quiz.timed = false;
    }

    let defaults = config.quiz.default_request();
    let mut request = QuizRequest::new(
        args.amount.unwrap_or(defaults.amount),
        args.difficulty.unwrap_or(defaults.difficulty),
        args.category.unwrap_or(defaults.category),
    );
    request.validate(config.quiz.min_questions, config.quiz.max_questions)?;

    let client = OpenTdbClient::from_config(&config.provider)?;
    let mut ctl = QuizController::new(client, &config.quiz);
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let tick_every = Duration::from_millis(config.quiz.tick_interval_ms.max(1));
    let reveal = config.display.reveal_answers;

    let mut replay = false;
    loop {
        let launch = if replay {
            ctl.start_replay(now_ms()).await?
        } else {
            ctl.start(&request, now_ms()).await?
        };
        log_events(&mut ctl);

        match launch {
            Launch::Started(_) => {
                if !play_round(&mut ctl, &mut input, tick_every).await? {
                    ctl.abandon(now_ms());
                    log_events(&mut ctl);
                    return Ok(());
                }
                log_events(&mut ctl);
                if let Some(snapshot) = ctl.snapshot() {
                    println!("{}", render::results(&snapshot, reveal));
                }
            }
            Launch::Rejected(code) => {
                println!("Error: {}. Please try again.", code.message());
            }
        }

        println!("{}", render::AFTER_HELP);
        match read_next(&mut input).await? {
            Next::Again => {
                // A graded session replays its own shape; otherwise retry the request.
                replay = ctl.session().is_some();
            }
            Next::Home => {
                ctl.abandon(now_ms());
                log_events(&mut ctl);
                match configure(&mut ctl, &mut input, &request).await? {
                    Some(next) => request = next,
                    None => return Ok(()),
                }
                replay = false;
            }
            Next::Quit => {
                ctl.abandon(now_ms());
                log_events(&mut ctl);
                return Ok(());
            }
        }
    }
}

/// Drive one session until it is graded. Returns `false` when the player
/// quits or input ends first.
async fn play_round<P>(
    ctl: &mut QuizController<P>,
    input: &mut Input,
    tick_every: Duration,
) -> Result<bool, Box<dyn Error>>
where
    P: QuestionProvider + CategoryProvider,
{
    let Some(snapshot) = ctl.snapshot() else {
        return Ok(false);
    };
    println!("{}", render::questions(&snapshot));
    println!("{}", render::PLAY_HELP);
    println!("{}", render::status(&snapshot));

    let mut ticker = tokio::time::interval(tick_every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_second = snapshot.remaining_ms.div_ceil(1000);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if ctl.tick(now_ms()).is_some() {
                    return Ok(true);
                }
                let Some(snapshot) = ctl.snapshot() else {
                    return Ok(false);
                };
                if snapshot.timed {
                    let second = snapshot.remaining_ms.div_ceil(1000);
                    if second != last_second && (second % 10 == 0 || second <= 5) {
                        println!("{}", render::status(&snapshot));
                    }
                    last_second = second;
                }
            }
            line = input.next_line() => {
                let Some(line) = line? else {
                    return Ok(false);
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(Command::Select { question, choice }) => select(ctl, question, choice),
                    Some(Command::Show) => {
                        if let Some(snapshot) = ctl.snapshot() {
                            println!("{}", render::questions(&snapshot));
                        }
                    }
                    Some(Command::Time) => {
                        if let Some(snapshot) = ctl.snapshot() {
                            println!("{}", render::status(&snapshot));
                        }
                    }
                    Some(Command::Submit) => {
                        ctl.submit(now_ms());
                        return Ok(true);
                    }
                    Some(Command::Quit) => return Ok(false),
                    Some(Command::Help) => println!("{}", render::PLAY_HELP),
                    None => println!("Unrecognized input. Type `help` for commands."),
                }
            }
        }
    }
}

fn select<P>(ctl: &mut QuizController<P>, question: usize, choice: usize)
where
    P: QuestionProvider + CategoryProvider,
{
    let Some(snapshot) = ctl.snapshot() else {
        return;
    };
    let Some(view) = question.checked_sub(1).and_then(|i| snapshot.questions.get(i)) else {
        println!("No question {question}.");
        return;
    };
    let Some(answer) = choice.checked_sub(1).and_then(|i| view.choices.get(i)) else {
        println!("Question {question} has no choice {choice}.");
        return;
    };
    match ctl.select_answer(view.index, answer, now_ms()) {
        Ok(Some(_)) => println!("Q{question}: {answer}"),
        Ok(None) => println!("Answers are locked."),
        Err(e) => println!("{e}"),
    }
}

async fn read_next(input: &mut Input) -> Result<Next, Box<dyn Error>> {
    loop {
        let Some(line) = input.next_line().await? else {
            return Ok(Next::Quit);
        };
        match parse_next(&line) {
            Some(next) => return Ok(next),
            None => println!("{}", render::AFTER_HELP),
        }
    }
}

/// Ask for a new quiz shape, offering the previous one as defaults.
/// Returns `None` when input ends.
async fn configure<P>(
    ctl: &mut QuizController<P>,
    input: &mut Input,
    previous: &QuizRequest,
) -> Result<Option<QuizRequest>, Box<dyn Error>>
where
    P: QuestionProvider + CategoryProvider,
{
    let (min, max) = ctl.amount_range();

    let amount = loop {
        let label = format!("Number of questions ({min}-{max})");
        let Some(answer) = prompt(input, &label, &previous.amount.to_string()).await? else {
            return Ok(None);
        };
        match answer.parse::<u32>() {
            Ok(n) if (min..=max).contains(&n) => break n,
            _ => println!("Enter a number from {min} to {max}."),
        }
    };

    let difficulty = loop {
        let label = "Difficulty (easy, medium, hard)";
        let Some(answer) = prompt(input, label, previous.difficulty.as_str()).await? else {
            return Ok(None);
        };
        match answer.parse::<Difficulty>() {
            Ok(d) => break d,
            Err(e) => println!("{e}"),
        }
    };

    if ctl.categories().is_empty() {
        ctl.load_categories().await?;
    }
    let category = loop {
        let label = "Category (`list` to show all)";
        let Some(answer) = prompt(input, label, previous.category.as_str()).await? else {
            return Ok(None);
        };
        if answer.eq_ignore_ascii_case("list") {
            println!("{}", CategorySelection::Mixed);
            for category in ctl.categories() {
                println!("{}", category.name);
            }
            continue;
        }
        let selection = CategorySelection::named(answer);
        match resolve_category_id(&selection, ctl.categories()) {
            Ok(_) => break selection,
            Err(e) => println!("{e}"),
        }
    };

    Ok(Some(QuizRequest::new(amount, difficulty, category)))
}

async fn prompt(
    input: &mut Input,
    label: &str,
    default: &str,
) -> Result<Option<String>, Box<dyn Error>> {
    print!("{label} [{default}]: ");
    std::io::stdout().flush()?;
    let Some(line) = input.next_line().await? else {
        return Ok(None);
    };
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(Some(default.to_string()))
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

fn log_events<P>(ctl: &mut QuizController<P>)
where
    P: QuestionProvider + CategoryProvider,
{
    for event in ctl.drain_events() {
        debug!(?event, "session event");
    }
}
