//! The API surface, one method per remote action.
//!
//! Each entry names the method, its typed arguments, the verb, the path
//! (a `format!` template filled from the arguments) and optionally the body
//! or query fields to send. Path segments are substituted literally: an id
//! containing `/` or `:` reaches the server as written.

use serde_json::{Map, Value};

use super::{ApiClient, ApiError, ApiMethod, RequestBody, UrlParameters};

macro_rules! endpoints {
    (@path [$($template:tt)+]) => {
        format!($($template)+)
    };

    (@payload) => {
        (None::<RequestBody>, None::<UrlParameters>)
    };

    (@payload body { $($key:literal: $value:expr),* }) => {{
        let mut fields = Map::new();
        $( fields.insert($key.to_string(), serde_json::to_value($value)?); )*
        (Some(RequestBody::from(fields)), None::<UrlParameters>)
    }};

    (@payload query { $($key:literal: $value:expr),* }) => {{
        let parameters = UrlParameters::new() $( .with($key, $value) )*;
        (None::<RequestBody>, Some(parameters))
    }};

    ($(
        $(#[$meta:meta])*
        fn $name:ident($($arg:ident: $ty:ty),* $(,)?)
            => $method:ident $path:tt $(, $kind:ident { $($key:literal: $value:expr),* $(,)? })?;
    )*) => {
        impl ApiClient {
            $(
                $(#[$meta])*
                pub async fn $name(&self, $($arg: $ty),*) -> Result<Value, ApiError> {
                    let path = endpoints!(@path $path);
                    let (body, query) = endpoints!(@payload $($kind { $($key: $value),* })?);
                    self.call(ApiMethod::$method, &path, body.as_ref(), query.as_ref())
                        .await
                }
            )*
        }
    };
}

endpoints! {
    /// Checks that the API is reachable.
    fn get_test_connection() => Get ["/"];

    fn post_user_change_access_key(
        current_access_key: &str,
        new_access_key: &str,
        new_email: &str,
    ) => Post ["/user/change-access-key"], body {
        "currentAccessKey": current_access_key,
        "newAccessKey": new_access_key,
        "newEmail": new_email,
    };

    fn post_user_resend_email_verification(email: &str)
        => Post ["/user/resend-email-verification"], body { "email": email };

    fn post_user_verify_email(verification_token: &str)
        => Post ["/user/verify-email"], body { "verificationToken": verification_token };

    fn get_user_information() => Get ["/user/information"];

    /// Asks for a deletion token to be mailed to `email`.
    fn post_user_deletion_request(email: &str)
        => Post ["/user/deletion/request"], body { "email": email };

    fn post_user_deletion_delete(deletion_token: &str)
        => Post ["/user/deletion/delete"], body { "deletionToken": deletion_token };

    fn post_user_recovery_request(email: &str)
        => Post ["/user/recovery/request"], body { "email": email };

    fn post_user_recovery_recover(
        recovery_token: &str,
        new_access_key: &str,
        delete_content: bool,
    ) => Post ["/user/recovery/recover"], body {
        "recoveryToken": recovery_token,
        "newAccessKey": new_access_key,
        "deleteContent": delete_content,
    };

    fn post_user_delete() => Post ["/user/delete"];

    fn get_user_data() => Get ["/user/data"];

    fn get_user_gift_keys() => Get ["/user/giftkeys"];

    fn get_user_subscription() => Get ["/user/subscription"];

    fn get_user_keystore() => Get ["/user/keystore"];

    /// Replaces the keystore. `change_index` must match the server's current index.
    fn put_user_keystore(keystore: &str, change_index: u64)
        => Put ["/user/keystore"], body {
            "keystore": keystore,
            "changeIndex": change_index,
        };

    fn get_user_objects_type(object_type: &str)
        => Get ["/user/objects/{}", object_type];

    fn put_user_objects_type(object_type: &str, meta: &str, data: &str, change_index: u64)
        => Put ["/user/objects/{}", object_type], body {
            "meta": meta,
            "data": data,
            "changeIndex": change_index,
        };

    fn get_user_objects_type_id(object_type: &str, id: &str)
        => Get ["/user/objects/{}/{}", object_type, id];

    fn put_user_objects_type_id(object_type: &str, id: &str)
        => Put ["/user/objects/{}/{}", object_type, id];

    fn patch_user_objects_type_id(
        object_type: &str,
        id: &str,
        meta: &str,
        data: &str,
        change_index: u64,
    ) => Patch ["/user/objects/{}/{}", object_type, id], body {
        "meta": meta,
        "data": data,
        "changeIndex": change_index,
    };

    fn delete_user_objects_type_id(object_type: &str, id: &str)
        => Delete ["/user/objects/{}/{}", object_type, id];

    fn get_user_client_settings() => Get ["/user/clientsettings"];

    fn post_user_submission(
        data: &str,
        data_name: &str,
        author_name: &str,
        author_email: &str,
        socials: &Value,
        mediums: &Value,
        event: &str,
    ) => Post ["/user/submission"], body {
        "data": data,
        "dataName": data_name,
        "authorName": author_name,
        "authorEmail": author_email,
        "socials": socials,
        "mediums": mediums,
        "event": event,
    };

    fn get_user_submission_event(event: &str)
        => Get ["/user/submission/{}", event];

    /// Same resource as [`ApiClient::get_user_submission_event`]; the service
    /// includes the caller's votes when authenticated.
    fn get_user_vote_submission_event(event: &str)
        => Get ["/user/submission/{}", event];

    fn post_user_vote_submission_event(event: &str, id: &str)
        => Post ["/user/submission/{}", event], body { "id": id };

    fn delete_user_vote_submission_event(event: &str, id: &str)
        => Delete ["/user/submission/{}", event], body { "id": id };

    fn post_user_subscription_bind(
        payment_processor: &str,
        subscription_id: &str,
        confirmed_replace: bool,
        confirmed_ignore: bool,
    ) => Post ["/user/subscription/bind"], body {
        "paymentProcessor": payment_processor,
        "subscriptionId": subscription_id,
        "confirmedReplace": confirmed_replace,
        "confirmedIgnore": confirmed_ignore,
    };

    fn post_user_subscription_change(new_subscription_plan: &str)
        => Post ["/user/subscription/change"], body {
            "newSubscriptionPlan": new_subscription_plan,
        };

    fn post_ai_generate(input: &str, model: &str, parameters: &Value)
        => Post ["/ai/generate"], body {
            "input": input,
            "model": model,
            "parameters": parameters,
        };

    /// The service answers with an event stream; it is decoded like any other
    /// body, which normally yields `Value::Null`.
    fn post_ai_generate_stream(input: &str, model: &str, parameters: &Value)
        => Post ["/ai/generate-stream"], body {
            "input": input,
            "model": model,
            "parameters": parameters,
        };

    fn post_ai_generate_image(input: &str, model: &str, parameters: &Value, url: &str)
        => Post ["/ai/generate-image"], body {
            "input": input,
            "model": model,
            "parameters": parameters,
            "url": url,
        };

    fn post_ai_classify() => Post ["/ai/classify"];

    fn get_ai_generate_image_suggest_tags(model: &str, prompt: &str)
        => Get ["/ai/generate-image/suggest-tags"], query {
            "model": model,
            "prompt": prompt,
        };

    fn get_ai_generate_voice(text: &str, seed: &str, voice: i64, opus: bool, version: &str)
        => Get ["/ai/generate-voice"], query {
            "text": text,
            "seed": seed,
            "voice": voice,
            "opus": opus,
            "version": version,
        };

    /// Sent as POST rather than GET, since the training data travels in a JSON body.
    fn post_ai_module_train(
        data: &str,
        lr: f64,
        steps: u64,
        model: &str,
        name: &str,
        description: &str,
    ) => Post ["/ai/module/train"], body {
        "data": data,
        "lr": lr,
        "steps": steps,
        "model": model,
        "name": name,
        "description": description,
    };

    fn get_ai_module_all() => Get ["/ai/module/all"];

    fn get_ai_module_id(id: &str) => Get ["/ai/module/all/{}", id];

    fn delete_ai_module_id(id: &str) => Delete ["/ai/module/{}", id];

    fn post_ai_module_buy_training_steps(amount: u64)
        => Post ["/ai/module/buy-training-steps"], body { "amount": amount };
}

impl ApiClient {
    /// Exchanges the configured access key for an access token.
    ///
    /// The current token is still attached; the service ignores it here.
    pub async fn post_user_login(&self) -> Result<Value, ApiError> {
        let mut fields = Map::new();
        fields.insert(
            "key".to_string(),
            Value::String(self.config().access_key.clone()),
        );

        self.call(
            ApiMethod::Post,
            "/user/login",
            Some(&RequestBody::from(fields)),
            None,
        )
        .await
    }

    /// Stores the client settings blob. `settings` is already serialized and
    /// is sent exactly as given.
    pub async fn put_user_client_settings(&self, settings: &str) -> Result<Value, ApiError> {
        let body = RequestBody::Raw(settings.to_string());
        self.call(ApiMethod::Put, "/user/clientsettings", Some(&body), None)
            .await
    }
}
