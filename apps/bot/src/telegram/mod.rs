//! Telegram transport — turns teloxide updates into conversation events and
//! conversation replies into Bot API calls. No business logic lives here.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    net::Download,
    prelude::*,
    types::{ChatAction, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode, Update},
    utils::command::BotCommands,
};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::conversation::handlers::handle_event;
use crate::conversation::{Action, Delivery, Event, Reply, ACTION_MENU};
use crate::ingest::upload::DocumentSource;
use crate::session::ChatKey;
use crate::state::AppState;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "how to use the bot")]
    Start,
    #[command(description = "show this help")]
    Help,
    #[command(description = "numeric ATS score card for the current resume and job")]
    Score,
}

/// Runs the long-polling dispatcher until Ctrl-C.
pub async fn run(bot: Bot, state: AppState) {
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(command_handler),
                )
                .branch(dptree::endpoint(message_handler)),
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            debug!("Unhandled update: {:?}", upd);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in update handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: AppState,
) -> ResponseResult<()> {
    info!("Chat {}: command {:?}", msg.chat.id.0, cmd);
    let event = match cmd {
        Command::Start => Event::Start,
        Command::Help => Event::Help,
        Command::Score => {
            show_typing(&bot, msg.chat.id).await;
            Event::Score
        }
    };
    let reply = handle_event(&state, ChatKey(msg.chat.id.0), event).await;
    send_reply(&bot, msg.chat.id, None, reply).await
}

async fn message_handler(bot: Bot, msg: Message, state: AppState) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    let chat = ChatKey(chat_id.0);

    let reply = if let Some(doc) = msg.document() {
        info!("Chat {chat}: document {:?}", doc.file_name);
        let source = TelegramDocument {
            bot: bot.clone(),
            file_id: doc.file.id.clone(),
        };
        let event = Event::Document {
            file_name: doc.file_name.as_deref(),
            source: &source,
        };
        handle_event(&state, chat, event).await
    } else if let Some(text) = msg.text() {
        info!("Chat {chat}: text message ({} chars)", text.chars().count());
        show_typing(&bot, chat_id).await;
        handle_event(&state, chat, Event::Text(text)).await
    } else {
        debug!("Chat {chat}: ignoring message without text or document");
        return Ok(());
    };

    send_reply(&bot, chat_id, None, reply).await
}

async fn callback_handler(bot: Bot, query: CallbackQuery, state: AppState) -> ResponseResult<()> {
    // Always answer so the client stops its loading indicator.
    bot.answer_callback_query(&query.id).await?;

    let Some(message) = query.message.as_ref() else {
        return Ok(());
    };
    let Some(action) = query.data.as_deref().and_then(Action::from_callback_data) else {
        warn!("Unknown callback data: {:?}", query.data);
        return Ok(());
    };

    let chat_id = message.chat.id;
    let chat = ChatKey(chat_id.0);
    info!("Chat {chat}: button {}", action.callback_data());
    if action.mode().is_some() {
        show_typing(&bot, chat_id).await;
    }

    let reply = handle_event(&state, chat, Event::Button(action)).await;
    send_reply(&bot, chat_id, Some(message.id), reply).await
}

/// Sends a reply, editing `origin` in place when the reply asks for it.
/// A failed edit falls back to a new message.
async fn send_reply(
    bot: &Bot,
    chat_id: ChatId,
    origin: Option<MessageId>,
    reply: Reply,
) -> ResponseResult<()> {
    let markup = reply.menu.then(action_keyboard);

    if let (Delivery::Replace, Some(message_id)) = (reply.delivery, origin) {
        let mut edit = bot
            .edit_message_text(chat_id, message_id, reply.text.clone())
            .parse_mode(ParseMode::Html);
        if let Some(markup) = markup.clone() {
            edit = edit.reply_markup(markup);
        }
        match edit.await {
            Ok(_) => return Ok(()),
            Err(e) => warn!(
                "Chat {}: editing report failed, sending new message: {e}",
                chat_id.0
            ),
        }
    }

    let mut send = bot
        .send_message(chat_id, reply.text)
        .parse_mode(ParseMode::Html);
    if let Some(markup) = markup {
        send = send.reply_markup(markup);
    }
    send.await?;
    Ok(())
}

fn action_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(ACTION_MENU.iter().map(|row| {
        row.iter()
            .map(|action| InlineKeyboardButton::callback(action.label(), action.callback_data()))
            .collect::<Vec<_>>()
    }))
}

async fn show_typing(bot: &Bot, chat_id: ChatId) {
    if let Err(e) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
        debug!("Chat {}: typing indicator failed: {e}", chat_id.0);
    }
}

/// A Telegram document, downloaded on demand.
struct TelegramDocument {
    bot: Bot,
    file_id: String,
}

#[async_trait]
impl DocumentSource for TelegramDocument {
    async fn download_to(&self, dest: &Path) -> Result<()> {
        let file = self.bot.get_file(&self.file_id).await?;
        let mut dst = tokio::fs::File::create(dest).await?;
        self.bot.download_file(&file.path, &mut dst).await?;
        dst.flush().await?;
        Ok(())
    }
}
