use std::sync::Arc;

use lana_quiz_bot::config::Config;
use lana_quiz_bot::quiz::view::{self, Command};
use lana_quiz_bot::quiz::{Catalog, Progress, QuizSession};
use log::{debug, error, info, warn};
use teloxide::{
    dispatching::dialogue::{ErasedStorage, InMemStorage, Storage},
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup, ParseMode},
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
type QuizStorage = Arc<ErasedStorage<State>>;

#[derive(Clone, Default, Debug)]
pub enum State {
    #[default]
    Start,
    InQuiz {
        session: QuizSession,
    },
}

#[tokio::main]
async fn main() {
    let env_file = dotenv::dotenv();
    pretty_env_logger::init();
    if let Err(err) = env_file {
        debug!("No .env file loaded: {}", err);
    }
    info!("Starting quiz bot...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    let catalog = match Catalog::builtin() {
        Ok(catalog) => Arc::new(catalog),
        Err(err) => {
            error!("Failed to load the quiz: {}", err);
            std::process::exit(1);
        }
    };
    info!(
        "Loaded \"{}\": {} questions, {} songs",
        catalog.title(),
        catalog.question_count(),
        catalog.catalog_size()
    );

    let bot = Bot::new(config.bot_token);
    let storage: QuizStorage = InMemStorage::<State>::new().erase();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::InQuiz { session }].endpoint(quiz_step)),
    )
    .dependencies(dptree::deps![storage, catalog])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

async fn start(
    bot: Bot,
    dialogue: QuizDialogue,
    catalog: Arc<Catalog>,
    msg: Message,
) -> HandlerResult {
    info!("Chat {} started the quiz", msg.chat.id);
    bot.send_message(msg.chat.id, view::greeting_text(&catalog))
        .parse_mode(ParseMode::Html)
        .await?;

    let session = QuizSession::new(catalog);
    send_question(&bot, msg.chat.id, &session).await?;

    dialogue.update(State::InQuiz { session }).await?;
    Ok(())
}

async fn quiz_step(
    bot: Bot,
    dialogue: QuizDialogue,
    mut session: QuizSession,
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please pick one of the options (as text)")
            .await?;
        return Ok(());
    };

    let outcome = match Command::parse(text, &session) {
        Command::Select(choice) => session.select_answer(&choice),
        Command::Next => match session.advance() {
            Ok(Progress::Completed) => {
                if let Some(result) = session.result() {
                    info!("Chat {} finished the quiz with {:?}", msg.chat.id, result.title);
                }
                Ok(())
            }
            Ok(Progress::Question(index)) => {
                debug!("Chat {} moved to question {}", msg.chat.id, index);
                Ok(())
            }
            Err(err) => Err(err),
        },
        Command::Previous => {
            if !session.retreat() {
                bot.send_message(msg.chat.id, "This is already the first question.")
                    .await?;
                return Ok(());
            }
            Ok(())
        }
        Command::Restart => {
            session.reset();
            Ok(())
        }
        Command::Unknown => {
            bot.send_message(msg.chat.id, "Please choose one of the options below.")
                .await?;
            send_question(&bot, msg.chat.id, &session).await?;
            return Ok(());
        }
    };

    // A rejected operation leaves the session untouched, so the stored state stays as is.
    if let Err(err) = outcome {
        warn!("Chat {}: {}", msg.chat.id, err);
        bot.send_message(msg.chat.id, view::rejection_text(&err, &session))
            .await?;
        return Ok(());
    }

    send_question(&bot, msg.chat.id, &session).await?;
    dialogue.update(State::InQuiz { session }).await?;
    Ok(())
}

async fn send_question(bot: &Bot, chat_id: ChatId, session: &QuizSession) -> HandlerResult {
    let keyboard = KeyboardMarkup::new(
        view::keyboard(session)
            .into_iter()
            .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>()),
    );

    bot.send_message(chat_id, view::question_text(session))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}
