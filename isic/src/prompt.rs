/// Ask for the password of `username` on the terminal. Input is hidden as it's typed.
pub(crate) fn prompt_password(username: &str) -> Result<String, dialoguer::Error> {
    dialoguer::Password::new()
        .with_prompt(format!("Password for user \"{}\"", username))
        .interact()
}
